use super::types::FormatKind;
use crate::container::Mapping;

/// First line of every rendered file
pub const HEADER: &str = "# generated by ansible";

/// Field width property keys are left-justified to
pub const PROPERTY_KEY_WIDTH: usize = 30;

/// Render a mapping in the given layout.
///
/// The output is the header line, one line per entry in key order and a
/// trailing blank line. An empty mapping still yields the header and the
/// blank line.
pub fn render(kind: FormatKind, mapping: &Mapping) -> String {
    let mut out = String::with_capacity(HEADER.len() + 2 + mapping.len() * 32);
    out.push_str(HEADER);
    out.push('\n');

    for (key, value) in mapping {
        let line = match kind {
            FormatKind::Environments => format!("{}={}\n", key, value),
            FormatKind::Properties => {
                format!("{:<width$} = {}\n", key, value, width = PROPERTY_KEY_WIDTH)
            }
        };
        out.push_str(&line);
    }

    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_environments() {
        let rendered = render(FormatKind::Environments, &mapping(&[("B", "2"), ("A", "1")]));
        assert_eq!(rendered, "# generated by ansible\nA=1\nB=2\n\n");
    }

    #[test]
    fn test_render_empty_environments() {
        let rendered = render(FormatKind::Environments, &Mapping::new());
        assert_eq!(rendered, "# generated by ansible\n\n");
    }

    #[test]
    fn test_render_properties_pads_key() {
        let rendered = render(FormatKind::Properties, &mapping(&[("db.host", "localhost")]));
        let expected = format!("# generated by ansible\ndb.host{} = localhost\n\n", " ".repeat(23));
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_properties_keeps_long_key() {
        let key = "a.very.long.property.key.that.exceeds.thirty";
        let rendered = render(FormatKind::Properties, &mapping(&[(key, "x")]));
        assert!(rendered.contains(&format!("\n{} = x\n", key)));
    }

    #[test]
    fn test_render_keeps_value_verbatim() {
        let rendered = render(FormatKind::Environments, &mapping(&[("JAVA_OPTS", "-Xmx1g -Dfoo=bar")]));
        assert!(rendered.contains("\nJAVA_OPTS=-Xmx1g -Dfoo=bar\n"));
    }

    #[test]
    fn test_format_kind_as_str() {
        assert_eq!(FormatKind::Environments.as_str(), "environments");
        assert_eq!(FormatKind::Properties.to_string(), "properties");
    }
}
