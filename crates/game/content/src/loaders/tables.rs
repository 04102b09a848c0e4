//! Static table loader.

use std::path::Path;

use battle_core::{BattleTables, CardRow, EnemyBehaviorRow, EnemyRow, MonsterSkillRow};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Table file structure for RON files.
///
/// Every list may be omitted; a file with only `cards` is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesFile {
    pub cards: Vec<CardRow>,
    pub enemies: Vec<EnemyRow>,
    pub behaviors: Vec<EnemyBehaviorRow>,
    pub skills: Vec<MonsterSkillRow>,
}

impl TablesFile {
    pub fn into_tables(self) -> BattleTables {
        BattleTables::from_rows(self.cards, self.enemies, self.behaviors, self.skills)
    }
}

/// Loader for card, enemy, behavior and skill rows from RON files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load every row list from a RON file.
    pub fn load(path: &Path) -> LoadResult<BattleTables> {
        let content = read_file(path)?;
        let file: TablesFile = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables RON {}: {}", path.display(), e))?;

        tracing::debug!(
            cards = file.cards.len(),
            enemies = file.enemies.len(),
            behaviors = file.behaviors.len(),
            skills = file.skills.len(),
            "loaded tables"
        );
        Ok(file.into_tables())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use battle_core::{EffectType, ElementType};

    use super::*;

    #[test]
    fn loads_rows_with_spreadsheet_spellings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                cards: [
                    (
                        id: "fireball",
                        display_name: "Fireball",
                        element: Fire,
                        action_cost: 2,
                        avalue_inc: 5,
                        effects: [
                            (effect_type: AOEDamage, value: "12"),
                            (effect_type: SelfBuff, value: "Guard,0,1,1", requirement: "Ametervalue>=30"),
                        ],
                    ),
                ],
                enemies: [
                    (id: "slime", display_name: "Slime", hp: 40, skills: [(skill_id: "splash")]),
                ],
                skills: [
                    (id: "splash", display_name: "Splash", effects: [(effect_type: SingleDamage, value: 6.0)]),
                ],
            )"#
        )
        .unwrap();

        let tables = TablesLoader::load(file.path()).unwrap();
        let card = tables.card("fireball").unwrap();
        assert_eq!(card.element, ElementType::Fire);
        assert_eq!(card.effects.len(), 2);
        assert_eq!(card.effects[0].effect_type, EffectType::AoeDamage);
        assert_eq!(card.effects[1].requirement, "Ametervalue>=30");

        let slime = tables.enemy("slime").unwrap();
        assert_eq!(slime.base_atk, 100);
        assert_eq!(slime.skills[0].requirement, "");
        assert!(tables.skill("splash").is_some());
    }

    #[test]
    fn reports_parse_errors_with_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(cards: [(id: 3)])").unwrap();

        let error = TablesLoader::load(file.path()).unwrap_err().to_string();
        assert!(error.contains("Failed to parse tables RON"));
        assert!(error.contains(&file.path().display().to_string()));
    }
}
