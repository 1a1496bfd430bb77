//! Inbound command parsing: `card <keyword>` or `卡片 <keyword>`.

/// Recognized command prefixes, including the separating space.
pub const COMMAND_PREFIXES: [&str; 2] = ["card ", "卡片 "];

/// A parsed card command. `keyword` is trimmed and may be empty (`"card "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCommand {
    pub keyword: String,
}

impl CardCommand {
    /// Parses message text; `None` for anything that is not a card command.
    pub fn parse(content: &str) -> Option<Self> {
        COMMAND_PREFIXES.iter().find_map(|prefix| {
            content.strip_prefix(prefix).map(|rest| Self {
                keyword: rest.trim().to_string(),
            })
        })
    }

    pub fn has_keyword(&self) -> bool {
        !self.keyword.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_english_prefix() {
        assert_eq!(
            CardCommand::parse("card b站"),
            Some(CardCommand {
                keyword: "b站".to_string()
            })
        );
    }

    #[test]
    fn test_parse_chinese_prefix_and_trims() {
        let cmd = CardCommand::parse("卡片   知乎  ").unwrap();
        assert_eq!(cmd.keyword, "知乎");
        assert!(cmd.has_keyword());
    }

    #[test]
    fn test_parse_keeps_inner_spaces() {
        assert_eq!(CardCommand::parse("card bilibili live").unwrap().keyword, "bilibili live");
    }

    #[test]
    fn test_parse_empty_keyword() {
        let cmd = CardCommand::parse("card ").unwrap();
        assert!(!cmd.has_keyword());
        assert!(!CardCommand::parse("卡片 \t ").unwrap().has_keyword());
    }

    #[test]
    fn test_parse_ignores_other_text() {
        assert_eq!(CardCommand::parse("card"), None);
        assert_eq!(CardCommand::parse("cardb站"), None);
        assert_eq!(CardCommand::parse("Card b站"), None);
        assert_eq!(CardCommand::parse(" card b站"), None);
        assert_eq!(CardCommand::parse("hello"), None);
        assert_eq!(CardCommand::parse(""), None);
    }
}
