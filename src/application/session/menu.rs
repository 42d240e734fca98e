use std::fmt;
use std::str::FromStr;

/// Actions offered by the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SelectCoin,
    ViewTable,
    SliceTable,
    Visualize,
    Summary,
    TopCoins,
    SearchIds,
    Export,
    Close,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::SelectCoin,
        MenuChoice::ViewTable,
        MenuChoice::SliceTable,
        MenuChoice::Visualize,
        MenuChoice::Summary,
        MenuChoice::TopCoins,
        MenuChoice::SearchIds,
        MenuChoice::Export,
        MenuChoice::Close,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::SelectCoin => "1",
            Self::ViewTable => "2",
            Self::SliceTable => "3",
            Self::Visualize => "4",
            Self::Summary => "5",
            Self::TopCoins => "6",
            Self::SearchIds => "7",
            Self::Export => "8",
            Self::Close => "0",
        }
    }

    /// Whether the action needs a loaded table
    pub fn needs_table(&self) -> bool {
        matches!(
            self,
            Self::ViewTable | Self::SliceTable | Self::Visualize | Self::Summary | Self::Export
        )
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SelectCoin => "select coin",
            Self::ViewTable => "view table",
            Self::SliceTable => "slice table",
            Self::Visualize => "visualize",
            Self::Summary => "summary statistics",
            Self::TopCoins => "top 100 coins",
            Self::SearchIds => "search coin ids",
            Self::Export => "export",
            Self::Close => "close program",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for MenuChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        MenuChoice::ALL
            .into_iter()
            .find(|c| c.key() == needle || c.to_string() == needle)
            .or(match needle.as_str() {
                "quit" | "exit" | "q" => Some(MenuChoice::Close),
                _ => None,
            })
            .ok_or_else(|| anyhow::anyhow!("Invalid choice: {}", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_key_and_label() {
        assert_eq!("1".parse::<MenuChoice>().unwrap(), MenuChoice::SelectCoin);
        assert_eq!(
            " Slice Table ".parse::<MenuChoice>().unwrap(),
            MenuChoice::SliceTable
        );
        assert_eq!("0".parse::<MenuChoice>().unwrap(), MenuChoice::Close);
        assert_eq!("quit".parse::<MenuChoice>().unwrap(), MenuChoice::Close);
        assert!("9".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = MenuChoice::ALL.iter().map(|c| c.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), MenuChoice::ALL.len());
    }
}
