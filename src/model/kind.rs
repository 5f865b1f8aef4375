//! The two record sets a conversion works with

use std::fmt;

use crate::config::SourceType;

/// Which table a source file, sheet or template variable belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Inventory,
    Groups,
}

impl TableKind {
    /// Base name shared by the source file, the xlsx sheet and the template variable
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Inventory => "inventory",
            TableKind::Groups => "groups",
        }
    }

    /// Source file name for a given source type, e.g. `groups.csv`
    pub fn file_name(self, source_type: SourceType) -> String {
        format!("{}.{}", self.name(), source_type.extension())
    }

    /// Worksheet read from and written to xlsx workbooks
    pub fn sheet_name(self) -> &'static str {
        self.name()
    }

    /// Variable the record list is bound to when rendering templates
    pub fn variable_name(self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(TableKind::Inventory.file_name(SourceType::Json), "inventory.json");
        assert_eq!(TableKind::Groups.file_name(SourceType::Csv), "groups.csv");
        assert_eq!(TableKind::Groups.file_name(SourceType::Xlsx), "groups.xlsx");
    }

    #[test]
    fn test_sheet_and_variable_names() {
        assert_eq!(TableKind::Inventory.sheet_name(), "inventory");
        assert_eq!(TableKind::Groups.variable_name(), "groups");
    }
}
