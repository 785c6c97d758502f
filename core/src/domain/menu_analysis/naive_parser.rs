//! Heuristic line parser used when no model-derived structure is available.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::menu_analysis::entities::MenuItem;

static INGREDIENT_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[，,、/]").expect("separator pattern is valid"));

/// Every line boundary OCR output may carry, including bare `\r` and the
/// Unicode line and paragraph separators.
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]")
        .expect("line break pattern is valid")
});

const LINE_DECORATIONS: &[char] = &[' ', '\t', '-', '•'];
const FALLBACK_NAME_CHARS: usize = 80;

/// Splits OCR'd text into menu items.
///
/// `Name: a, b / c` lines become an item with ingredients, other lines become
/// bare items. Never fails: any non-blank input yields at least one item.
pub fn naive_items_from_text(text: &str) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = LINE_BREAKS
        .split(text)
        .map(|line| line.trim_matches(LINE_DECORATIONS))
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect();

    let trimmed = text.trim();
    if items.is_empty() && !trimmed.is_empty() {
        let name: String = trimmed.chars().take(FALLBACK_NAME_CHARS).collect();
        items.extend(MenuItem::new(&name, Vec::<String>::new()));
    }

    items
}

fn parse_line(line: &str) -> Option<MenuItem> {
    let separator = if line.contains(':') {
        ':'
    } else if line.contains('：') {
        '：'
    } else {
        return MenuItem::new(line, Vec::<String>::new());
    };

    let (name, rest) = line.split_once(separator)?;
    MenuItem::new(name, INGREDIENT_SEPARATORS.split(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_line_boundary() {
        let text = "Soup: tofu\rTea: jasmine\u{2028}Cake: egg\x0cRice\r\nBun: pork";
        let names: Vec<String> = naive_items_from_text(text)
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["Soup", "Tea", "Cake", "Rice", "Bun"]);
    }

    #[test]
    fn splits_name_and_ingredients() {
        let items = naive_items_from_text("Pad Thai: peanut, shrimp, rice noodles");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Pad Thai");
        assert_eq!(items[0].ingredients, vec!["peanut", "shrimp", "rice noodles"]);
    }

    #[test]
    fn handles_full_width_separators() {
        let items = naive_items_from_text("宫保鸡丁：鸡肉，花生、辣椒/葱");
        assert_eq!(items[0].name, "宫保鸡丁");
        assert_eq!(items[0].ingredients, vec!["鸡肉", "花生", "辣椒", "葱"]);
    }

    #[test]
    fn ascii_colon_wins_over_full_width() {
        let items = naive_items_from_text("Soup：daily: tomato");
        assert_eq!(items[0].name, "Soup：daily");
        assert_eq!(items[0].ingredients, vec!["tomato"]);
    }

    #[test]
    fn strips_bullets_and_skips_blank_lines() {
        let items = naive_items_from_text("- Salad: lettuce, tomato\n\n  • Bread\n\t-\n");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Salad");
        assert_eq!(items[1].name, "Bread");
        assert!(items[1].ingredients.is_empty());
    }

    #[test]
    fn drops_lines_with_empty_name() {
        let items = naive_items_from_text(": orphan, ingredients\nTea");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Tea");
    }

    #[test]
    fn falls_back_to_truncated_input() {
        let long = format!(":{}", "x".repeat(120));
        let items = naive_items_from_text(&long);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name.chars().count(), 80);
        assert!(items[0].name.starts_with(':'));
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(naive_items_from_text("  \n\t ").is_empty());
    }

    #[test]
    fn any_non_blank_input_yields_an_item() {
        for input in ["a", "-", ":", "：，", "• - •", "x:y", "\n:\n"] {
            assert!(
                !naive_items_from_text(input).is_empty(),
                "no items for {input:?}"
            );
        }
    }
}
