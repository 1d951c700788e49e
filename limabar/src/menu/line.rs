use std::fmt;

use crate::action::Action;

pub const SEPARATOR: &str = "---";

/// One line of menu markup: `--<title> | key=value key=value`.
///
/// Each level of nesting adds two leading dashes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MenuLine {
    depth: usize,
    title: String,
    attributes: Vec<(String, String)>,
}

impl MenuLine {
    pub fn new<S: Into<String>>(depth: usize, title: S) -> Self {
        Self { depth, title: title.into(), attributes: Vec::new() }
    }

    #[must_use]
    pub fn attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn color(self, color: &str) -> Self { self.attribute("color", color) }

    #[must_use]
    pub fn href(self, url: &str) -> Self { self.attribute("href", url) }

    #[must_use]
    pub fn refresh(self) -> Self { self.attribute("refresh", "true") }

    /// Clicking the line re-runs `program` with the flags of `action`, in the
    /// background, then refreshes the menu.
    #[must_use]
    pub fn action(self, program: &str, action: &Action) -> Self {
        action
            .to_params()
            .into_iter()
            .enumerate()
            .fold(self.attribute("bash", program), |line, (index, param)| {
                line.attribute(format!("param{}", index + 1), param)
            })
            .attribute("terminal", "false")
            .refresh()
    }
}

impl fmt::Display for MenuLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("--")?;
        }
        f.write_str(&self.title)?;
        for (index, (key, value)) in self.attributes.iter().enumerate() {
            let separator = if index == 0 { " | " } else { " " };
            if value.contains(|c: char| c.is_whitespace() || c == '"') {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "{separator}{key}=\"{escaped}\"")?;
            } else {
                write!(f, "{separator}{key}={value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::VmAction;

    #[test]
    fn test_plain_line() {
        assert_eq!(MenuLine::new(0, "About").to_string(), "About");
        assert_eq!(MenuLine::new(2, "web").color("green").to_string(), "----web | color=green");
    }

    #[test]
    fn test_action_line() {
        let action = Action::Vm { vm: "default".to_string(), action: VmAction::Start };

        let line = MenuLine::new(1, "Start VM").action("/plugins/lima.1m.sh", &action);

        assert_eq!(
            line.to_string(),
            "--Start VM | bash=/plugins/lima.1m.sh param1=--vm-action param2=start param3=--vm \
             param4=default terminal=false refresh=true"
        );
    }

    #[test]
    fn test_values_with_spaces_are_quoted() {
        let action = Action::PullNewImage { vm: "default".to_string() };

        let line = MenuLine::new(0, "Pull").action("/Users/me/xbar plugins/lima", &action);

        assert_eq!(
            line.to_string(),
            "Pull | bash=\"/Users/me/xbar plugins/lima\" param1=--pull-new-image param2=--vm \
             param3=default terminal=false refresh=true"
        );
    }

    #[test]
    fn test_quotes_inside_values_are_escaped() {
        let line = MenuLine::new(0, "Pull").attribute("bash", r#"/Users/me/"xbar" plugins/lima"#);

        assert_eq!(line.to_string(), r#"Pull | bash="/Users/me/\"xbar\" plugins/lima""#);

        let line = MenuLine::new(0, "Pull").attribute("bash", r#"/plugins/a"b"#);

        assert_eq!(line.to_string(), r#"Pull | bash="/plugins/a\"b""#);
    }
}
