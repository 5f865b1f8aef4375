//! Column metadata

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header or object key)
    pub name: String,
    /// Column index (0-based position)
    pub index: usize,
}

impl Column {
    /// Create a new column with name and index
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Build columns from a header row, renaming repeats the way pandas does:
/// the second `name` becomes `name.1`, the third `name.2`, skipping any
/// suffix already taken by another header.
pub fn header_columns<I, S>(names: I) -> Vec<Column>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut repeats: HashMap<&str, usize> = HashMap::new();

    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if seen.insert(name.as_str()) {
                return Column::new(name.clone(), index);
            }

            let count = repeats.entry(name.as_str()).or_insert(1);
            let mut renamed = format!("{}.{}", name, count);
            while taken.contains(&renamed) {
                *count += 1;
                renamed = format!("{}.{}", name, count);
            }
            *count += 1;
            taken.insert(renamed.clone());
            Column::new(renamed, index)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_unique_headers_are_unchanged() {
        let columns = header_columns(["name", "hostname"]);
        assert_eq!(names(&columns), vec!["name", "hostname"]);
        assert_eq!(columns[1].index, 1);
    }

    #[test]
    fn test_repeated_headers_get_suffixes() {
        let columns = header_columns(["name", "hostname", "name", "name"]);
        assert_eq!(names(&columns), vec!["name", "hostname", "name.1", "name.2"]);
    }

    #[test]
    fn test_suffix_skips_existing_header() {
        let columns = header_columns(["name", "name.1", "name"]);
        assert_eq!(names(&columns), vec!["name", "name.1", "name.2"]);
    }
}
