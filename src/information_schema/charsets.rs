use crate::catalog::Catalog;
use crate::constructs::rows::Row;
use crate::errors::Result;
use crate::row;
use crate::session::Context;

pub const DEFAULT_CHARACTER_SET: &str = "utf8mb4";
pub const DEFAULT_COLLATION: &str = "utf8mb4_0900_bin";

struct Collation {
    name: &'static str,
    character_set: &'static str,
    id: u64,
    is_default: bool,
    sort_length: u32,
    pad_attribute: &'static str,
}

const COLLATIONS: &[Collation] = &[
    Collation {
        name: "ascii_bin",
        character_set: "ascii",
        id: 65,
        is_default: false,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "ascii_general_ci",
        character_set: "ascii",
        id: 11,
        is_default: true,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "binary",
        character_set: "binary",
        id: 63,
        is_default: true,
        sort_length: 1,
        pad_attribute: "NO PAD",
    },
    Collation {
        name: "latin1_bin",
        character_set: "latin1",
        id: 47,
        is_default: false,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "latin1_swedish_ci",
        character_set: "latin1",
        id: 8,
        is_default: true,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "utf16_general_ci",
        character_set: "utf16",
        id: 54,
        is_default: true,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "utf32_general_ci",
        character_set: "utf32",
        id: 60,
        is_default: true,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "utf8mb3_bin",
        character_set: "utf8mb3",
        id: 83,
        is_default: false,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "utf8mb3_general_ci",
        character_set: "utf8mb3",
        id: 33,
        is_default: true,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "utf8mb4_0900_ai_ci",
        character_set: "utf8mb4",
        id: 255,
        is_default: false,
        sort_length: 0,
        pad_attribute: "NO PAD",
    },
    Collation {
        name: "utf8mb4_0900_as_cs",
        character_set: "utf8mb4",
        id: 278,
        is_default: false,
        sort_length: 0,
        pad_attribute: "NO PAD",
    },
    Collation {
        name: DEFAULT_COLLATION,
        character_set: DEFAULT_CHARACTER_SET,
        id: 309,
        is_default: true,
        sort_length: 1,
        pad_attribute: "NO PAD",
    },
    Collation {
        name: "utf8mb4_bin",
        character_set: "utf8mb4",
        id: 46,
        is_default: false,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
    Collation {
        name: "utf8mb4_general_ci",
        character_set: "utf8mb4",
        id: 45,
        is_default: false,
        sort_length: 1,
        pad_attribute: "PAD SPACE",
    },
];

/// (name, description, max bytes per character)
const CHARACTER_SETS: &[(&str, &str, u32)] = &[
    ("ascii", "US ASCII", 1),
    ("binary", "Binary pseudo charset", 1),
    ("latin1", "cp1252 West European", 1),
    ("utf16", "UTF-16 Unicode", 4),
    ("utf32", "UTF-32 Unicode", 4),
    ("utf8mb3", "UTF-8 Unicode", 3),
    ("utf8mb4", "UTF-8 Unicode", 4),
];

/// (engine, support, comment, transactions, xa, savepoints)
const ENGINES: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "InnoDB",
        "DEFAULT",
        "Supports transactions, row-level locking, and foreign keys",
        "YES",
        "YES",
        "YES",
    ),
    (
        "MEMORY",
        "YES",
        "Hash based, stored in memory, useful for temporary tables",
        "NO",
        "NO",
        "NO",
    ),
];

fn yes_or_empty(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        ""
    }
}

fn default_collation_of(character_set: &str) -> Option<&'static str> {
    COLLATIONS
        .iter()
        .find(|collation| collation.character_set == character_set && collation.is_default)
        .map(|collation| collation.name)
}

pub fn read_collations(_ctx: &Context, _catalog: &Catalog) -> Result<Vec<Row>> {
    Ok(COLLATIONS
        .iter()
        .map(|collation| {
            row![
                collation.name,
                collation.character_set,
                collation.id,
                yes_or_empty(collation.is_default),
                "Yes",
                collation.sort_length,
                collation.pad_attribute,
            ]
        })
        .collect())
}

pub fn read_character_sets(_ctx: &Context, _catalog: &Catalog) -> Result<Vec<Row>> {
    Ok(CHARACTER_SETS
        .iter()
        .map(|(name, description, max_length)| {
            row![
                *name,
                default_collation_of(name).unwrap_or_default(),
                *description,
                *max_length,
            ]
        })
        .collect())
}

pub fn read_engines(_ctx: &Context, _catalog: &Catalog) -> Result<Vec<Row>> {
    Ok(ENGINES
        .iter()
        .map(|(engine, support, comment, transactions, xa, savepoints)| {
            row![*engine, *support, *comment, *transactions, *xa, *savepoints]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructs::components::DataInstance;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_character_set_has_exactly_one_default_collation() {
        for (name, _, _) in CHARACTER_SETS {
            assert_eq!(
                COLLATIONS
                    .iter()
                    .filter(|collation| collation.character_set == *name && collation.is_default)
                    .count(),
                1,
                "character set {}",
                name
            );
        }
    }

    #[test]
    fn utf8mb4_defaults_to_binary_collation() {
        let catalog = Catalog::new();
        let rows = read_character_sets(&Context::default(), &catalog).unwrap();
        let utf8mb4 = rows
            .iter()
            .find(|row| row.get(0).as_str() == Some(DEFAULT_CHARACTER_SET))
            .unwrap();
        assert_eq!(utf8mb4.get(1), &DataInstance::from(DEFAULT_COLLATION));
        assert_eq!(utf8mb4.get(3), &DataInstance::from(4u32));
    }
}
