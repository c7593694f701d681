//! # Content Catalog
//!
//! Ordered item lists for screens with selectable content. Loaded once at
//! startup and read-only afterwards. Every selectable screen has a non-empty
//! list of unique ids; `home` has none.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::core::screen::{Direction, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A selectable screen was given no items.
    EmptyItems(Screen),
    /// The same id appears twice in one screen's list.
    DuplicateItem { screen: Screen, id: String },
    /// Items were supplied for a screen without selectable content.
    NotSelectable(Screen),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::EmptyItems(screen) => write!(f, "screen {screen} has no items"),
            CatalogError::DuplicateItem { screen, id } => {
                write!(f, "screen {screen} lists {id:?} more than once")
            }
            CatalogError::NotSelectable(screen) => {
                write!(f, "screen {screen} does not take selectable content")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// An item id together with its place in the screen's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectableItem<'a> {
    pub id: &'a str,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: BTreeMap<Screen, Vec<String>>,
}

impl Catalog {
    /// Builds a catalog from per-screen lists.
    ///
    /// Every selectable screen must be present; a missing one is reported
    /// as [`CatalogError::EmptyItems`].
    pub fn new<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (Screen, Vec<S>)>,
        S: Into<String>,
    {
        let mut items = BTreeMap::new();
        for (screen, ids) in entries {
            if !screen.has_selectable_content() {
                return Err(CatalogError::NotSelectable(screen));
            }
            let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
            let mut seen = HashSet::new();
            for id in &ids {
                if !seen.insert(id.as_str()) {
                    return Err(CatalogError::DuplicateItem {
                        screen,
                        id: id.clone(),
                    });
                }
            }
            items.insert(screen, ids);
        }

        for screen in Screen::ALL.into_iter().filter(|s| s.has_selectable_content()) {
            if items.get(&screen).is_none_or(|ids| ids.is_empty()) {
                return Err(CatalogError::EmptyItems(screen));
            }
        }

        Ok(Self { items })
    }

    /// Catalog with the bundled mission content.
    pub fn bundled() -> Self {
        Self {
            items: BTreeMap::from([
                (Screen::Destination, to_owned(DESTINATIONS)),
                (Screen::Crew, to_owned(CREW)),
                (Screen::Technology, to_owned(TECHNOLOGY)),
            ]),
        }
    }

    /// Item ids for `screen`, empty for screens without selectable content.
    pub fn items(&self, screen: Screen) -> &[String] {
        self.items.get(&screen).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, screen: Screen) -> Option<&str> {
        self.items(screen).first().map(String::as_str)
    }

    pub fn find(&self, screen: Screen, id: &str) -> Option<SelectableItem<'_>> {
        self.items(screen)
            .iter()
            .position(|item| item == id)
            .map(|position| SelectableItem {
                id: self.items(screen)[position].as_str(),
                position,
            })
    }

    pub fn contains(&self, screen: Screen, id: &str) -> bool {
        self.find(screen, id).is_some()
    }

    /// The item one step away from `id`, or `None` at either end of the list
    /// (and when `id` is not in the list at all).
    pub fn adjacent(&self, screen: Screen, id: &str, direction: Direction) -> Option<&str> {
        let current = self.find(screen, id)?.position;
        let target = match direction {
            Direction::Previous => current.checked_sub(1)?,
            Direction::Next => current + 1,
        };
        self.items(screen).get(target).map(String::as_str)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::bundled()
    }
}

fn to_owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

const DESTINATIONS: &[&str] = &["Moon", "Mars", "Europa", "Titan"];
const CREW: &[&str] = &[
    "Douglas Hurley",
    "Mark Shuttleworth",
    "Victor Glover",
    "Anousheh Ansari",
];
const TECHNOLOGY: &[&str] = &["Launch vehicle", "Spaceport", "Space capsule"];

#[cfg(test)]
mod tests {
    use super::*;

    fn three_crew() -> Catalog {
        Catalog::new([
            (Screen::Destination, vec!["Moon"]),
            (Screen::Crew, vec!["A", "B", "C"]),
            (Screen::Technology, vec!["Spaceport"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let bundled = Catalog::bundled();
        let rebuilt = Catalog::new(
            Screen::ALL
                .into_iter()
                .filter(|s| s.has_selectable_content())
                .map(|s| (s, bundled.items(s).to_vec())),
        );
        assert_eq!(rebuilt, Ok(bundled));
    }

    #[test]
    fn test_home_has_no_items() {
        assert!(Catalog::bundled().items(Screen::Home).is_empty());
        assert_eq!(Catalog::bundled().first(Screen::Home), None);
    }

    #[test]
    fn test_rejects_empty_list() {
        let result = Catalog::new([
            (Screen::Destination, vec!["Moon"]),
            (Screen::Crew, Vec::new()),
            (Screen::Technology, vec!["Spaceport"]),
        ]);
        assert_eq!(result, Err(CatalogError::EmptyItems(Screen::Crew)));
    }

    #[test]
    fn test_rejects_missing_screen() {
        let result = Catalog::new([(Screen::Crew, vec!["A"])]);
        assert_eq!(result, Err(CatalogError::EmptyItems(Screen::Destination)));
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = Catalog::new([
            (Screen::Destination, vec!["Moon", "Moon"]),
            (Screen::Crew, vec!["A"]),
            (Screen::Technology, vec!["T"]),
        ]);
        assert_eq!(
            result,
            Err(CatalogError::DuplicateItem {
                screen: Screen::Destination,
                id: "Moon".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_home_items() {
        let result = Catalog::new([(Screen::Home, vec!["x"])]);
        assert_eq!(result, Err(CatalogError::NotSelectable(Screen::Home)));
    }

    #[test]
    fn test_adjacent_clamps() {
        let catalog = three_crew();
        assert_eq!(catalog.adjacent(Screen::Crew, "B", Direction::Next), Some("C"));
        assert_eq!(catalog.adjacent(Screen::Crew, "B", Direction::Previous), Some("A"));
        assert_eq!(catalog.adjacent(Screen::Crew, "C", Direction::Next), None);
        assert_eq!(catalog.adjacent(Screen::Crew, "A", Direction::Previous), None);
        assert_eq!(catalog.adjacent(Screen::Crew, "Z", Direction::Next), None);
    }

    #[test]
    fn test_find_reports_position() {
        let catalog = three_crew();
        let item = catalog.find(Screen::Crew, "C").unwrap();
        assert_eq!(item.position, 2);
        assert_eq!(item.id, "C");
    }
}
