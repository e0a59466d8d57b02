use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

#[derive(Debug, Clone, PartialEq)]
pub struct UserXp {
    pub discord_id: u64,
    pub xp: i64,
    pub level: i32,
    pub last_awarded_at: DateTime<Utc>,
}

impl UserXp {
    pub fn from_entity(entity: entity::user_xp::Model) -> Result<Self, AppError> {
        Ok(Self {
            discord_id: parse_u64_from_string(&entity.discord_id)?,
            xp: entity.xp,
            level: entity.level,
            last_awarded_at: entity.last_awarded_at,
        })
    }
}

/// XP needed to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: i32) -> i64 {
    let l = level as i64;
    5 * l * l + 50 * l + 100
}

/// Level reached with `xp` total experience.
pub fn level_for_xp(xp: i64) -> i32 {
    let mut level = 0;
    let mut remaining = xp;
    while remaining >= xp_for_next_level(level) {
        remaining -= xp_for_next_level(level);
        level += 1;
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(xp_for_next_level(0), 100);
        assert_eq!(xp_for_next_level(1), 155);
        assert_eq!(level_for_xp(0), 0);
        assert_eq!(level_for_xp(99), 0);
        assert_eq!(level_for_xp(100), 1);
        assert_eq!(level_for_xp(254), 1);
        assert_eq!(level_for_xp(255), 2);
    }
}
