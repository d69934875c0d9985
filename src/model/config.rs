use serde::{Deserialize, Deserializer, Serialize};

use super::board::Board;

/// Everything persisted in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Color of the focused card and active input, a name ("blue") or "#RRGGBB"
    #[serde(default = "default_primary_color", deserialize_with = "color_name_or_index")]
    pub primary_color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub boards: Vec<Board>,
}

impl Default for UserConfig {
    fn default() -> Self {
        UserConfig {
            primary_color: default_primary_color(),
            boards: Vec::new(),
        }
    }
}

fn default_primary_color() -> String {
    "blue".to_string()
}

/// Terminal palette order used by configs that store the color as a number
const INDEXED_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Name(String),
    Index(i64),
}

/// Accept `"blue"`, `"#RRGGBB"` or a palette index (`4`). Indices 0-7 become
/// names, 8-255 stay numeric, anything else (e.g. -1 for "clear") falls back
/// to the default.
fn color_name_or_index<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ColorValue>::deserialize(deserializer)? {
        Some(ColorValue::Name(name)) => name,
        Some(ColorValue::Index(i)) => match usize::try_from(i) {
            Ok(i) if i < INDEXED_NAMES.len() => INDEXED_NAMES[i].to_string(),
            Ok(i) if i <= 255 => i.to_string(),
            _ => default_primary_color(),
        },
        None => default_primary_color(),
    })
}

/// `null` reads as the empty value, as older files write empty lists that way
pub(super) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserConfig {
    pub fn board(&self, name: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.name == name)
    }

    pub fn board_mut(&mut self, name: &str) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| b.name == name)
    }

    /// Add a board with the default columns. Returns false if the name is taken.
    pub fn create_board(&mut self, name: &str, dir: &str) -> bool {
        if self.board(name).is_some() {
            return false;
        }
        self.boards.push(Board::new(name, dir));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_defaults_on_empty_object() {
        let config: UserConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.primary_color, "blue");
        assert!(config.boards.is_empty());
    }

    #[test]
    fn parses_documented_layout() {
        let json = r#"{
            "boards": [{
                "name": "masa",
                "dir": "/home/me/masa",
                "columns": ["Todo", "Open", "Closed"],
                "tasks": {
                    "Todo": [{"title": "Lorem", "description": "Ipsum"}],
                    "Closed": [{"title": "Done thing"}]
                }
            }]
        }"#;
        let config: UserConfig = serde_json::from_str(json).unwrap();
        let board = config.board("masa").unwrap();
        assert_eq!(board.columns, vec!["Todo", "Open", "Closed"]);
        assert_eq!(board.tasks_in("Todo")[0].description, "Ipsum");
        assert!(board.tasks_in("Open").is_empty());
        assert_eq!(board.tasks_in("Closed")[0].description, "");
    }

    #[test]
    fn numeric_color_and_null_boards() {
        let config: UserConfig =
            serde_json::from_str(r#"{"primary_color":4,"boards":null}"#).unwrap();
        assert_eq!(config.primary_color, "blue");
        assert!(config.boards.is_empty());

        let config: UserConfig =
            serde_json::from_str(r#"{"primary_color":"blue","boards":null}"#).unwrap();
        assert!(config.boards.is_empty());

        let config: UserConfig = serde_json::from_str(r#"{"primary_color":1}"#).unwrap();
        assert_eq!(config.primary_color, "red");
        let config: UserConfig = serde_json::from_str(r#"{"primary_color":208}"#).unwrap();
        assert_eq!(config.primary_color, "208");
        let config: UserConfig = serde_json::from_str(r#"{"primary_color":-1}"#).unwrap();
        assert_eq!(config.primary_color, "blue");
    }

    #[test]
    fn parses_numeric_color_file_with_boards() {
        let json = "{\n\t\"primary_color\": 2,\n\t\"boards\": [\n\t\t{\n\t\t\t\"name\": \"masa\",\n\t\t\t\"dir\": \"/home/me/masa\",\n\t\t\t\"columns\": [\"Todo\", \"In Progress\", \"Done\"],\n\t\t\t\"tasks\": {\"Todo\": [{\"title\": \"Lorem\", \"description\": \"\", \"created_at\": \"2024-03-01 10:00:00\"}]}\n\t\t}\n\t]\n}";
        let config: UserConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.primary_color, "green");
        let board = config.board("masa").unwrap();
        assert_eq!(board.tasks_in("Todo")[0].title, "Lorem");
        assert!(board.tasks_in("Done").is_empty());
    }

    #[test]
    fn create_board_rejects_duplicates() {
        let mut config = UserConfig::default();
        assert!(config.create_board("lanes", "/src/lanes"));
        assert!(!config.create_board("lanes", "/elsewhere"));
        assert_eq!(config.boards.len(), 1);
        assert_eq!(config.board("lanes").unwrap().dir, "/src/lanes");
    }
}
