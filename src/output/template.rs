//! Template-rendered artifacts (nornir, pyATS, ansible)

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tera::Tera;

use crate::error::ConvertError;
use crate::model::{Table, TableKind};

use super::Encoder;

const TEMPLATE_SUFFIX: &str = ".j2";

/// Every `*.j2` template below a directory, keyed by relative path (e.g. `nornir/hosts.j2`)
pub struct Templates {
    tera: Tera,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            tera: configure(Tera::default()),
        }
    }
}

impl Templates {
    /// Load all templates below `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ConvertError::TemplateDirNotFound(dir.to_path_buf()).into());
        }

        let glob = dir.join("**").join(format!("*{}", TEMPLATE_SUFFIX));
        let tera = Tera::new(&glob.to_string_lossy())
            .with_context(|| format!("Failed to load templates from {}", dir.display()))?;

        Ok(Self {
            tera: configure(tera),
        })
    }

    /// Build from in-memory `(name, source)` pairs
    pub fn from_raw(templates: &[(&str, &str)]) -> Result<Self> {
        let mut tera = configure(Tera::default());
        tera.add_raw_templates(templates.iter().copied())
            .context("Failed to parse templates")?;
        Ok(Self { tera })
    }

    /// Names of the loaded templates
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Render `name` with the table's records bound to the kind's variable
    pub fn render(&self, name: &str, table: &Table, kind: TableKind) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert(kind.variable_name(), &table.to_records());

        self.tera
            .render(name, &context)
            .with_context(|| format!("Failed to render template: {}", name))
    }
}

fn configure(mut tera: Tera) -> Tera {
    tera.autoescape_on(vec![TEMPLATE_SUFFIX]);
    tera.set_escape_fn(escape_markup);
    tera
}

/// Markup escaping as Jinja does it; unlike tera's default, `/` is left alone
pub fn escape_markup(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&#34;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
    output
}

/// Encoder rendering one named template
pub struct TemplateOutput<'a> {
    templates: &'a Templates,
    name: &'static str,
}

impl<'a> TemplateOutput<'a> {
    pub fn new(templates: &'a Templates, name: &'static str) -> Self {
        Self { templates, name }
    }
}

impl Encoder for TemplateOutput<'_> {
    fn encode(&self, table: &Table, kind: TableKind, writer: &mut dyn Write) -> Result<()> {
        let rendered = self.templates.render(self.name, table, kind)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    fn inventory() -> Table {
        let mut table = Table::new(vec![Column::new("name", 0), Column::new("data_site", 1)]);
        table.add_row(vec!["r1".into(), "<syd> & 'mel'".into()], 2);
        table.add_row(vec!["r2".into(), CellValue::Null], 3);
        table
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("a/b"), "a/b");
        assert_eq!(escape_markup(r#"<a href="x">&'"#), "&lt;a href=&#34;x&#34;&gt;&amp;&#39;");
    }

    #[test]
    fn test_render_binds_kind_variable_and_escapes() {
        let templates = Templates::from_raw(&[(
            "list.j2",
            "{% for host in inventory %}{{ host.name }}={{ host.data_site }};{% endfor %}",
        )])
        .unwrap();

        let rendered = templates.render("list.j2", &inventory(), TableKind::Inventory).unwrap();
        assert_eq!(rendered, "r1=&lt;syd&gt; &amp; &#39;mel&#39;;r2=;");
    }

    #[test]
    fn test_groups_variable() {
        let templates =
            Templates::from_raw(&[("count.j2", "{{ groups | length }}")]).unwrap();
        let rendered = templates.render("count.j2", &inventory(), TableKind::Groups).unwrap();
        assert_eq!(rendered, "2");
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let templates = Templates::default();
        assert!(templates.render("nornir/hosts.j2", &inventory(), TableKind::Inventory).is_err());
    }

    #[test]
    fn test_load_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = Templates::load(&dir.path().join("missing")).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::TemplateDirNotFound(_))
        ));
    }

    #[test]
    fn test_load_names_are_relative() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nornir")).unwrap();
        std::fs::write(dir.path().join("nornir/hosts.j2"), "hosts").unwrap();
        std::fs::write(dir.path().join("readme.txt"), "ignored").unwrap();

        let templates = Templates::load(dir.path()).unwrap();
        assert_eq!(templates.names(), vec!["nornir/hosts.j2"]);
    }
}
