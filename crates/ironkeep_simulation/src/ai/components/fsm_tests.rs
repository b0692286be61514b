//! Tests for FSM AI components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{AIConfig, AIState};
    use crate::config::EnemyConfig;

    #[test]
    fn test_ai_state_default() {
        let state = AIState::default();
        assert!(matches!(state, AIState::Idle));
        assert!(!state.is_chasing());
    }

    #[test]
    fn test_ai_config_default() {
        let config = AIConfig::default();
        assert_eq!(config.sight_range, 25.0);
        assert_eq!(config.attack_range, 2.0);
        assert_eq!(config.speed, 4.0);
        assert_eq!(config.contact_damage, 0.1);
    }

    #[test]
    fn test_ai_config_follows_enemy_config() {
        let enemy = EnemyConfig {
            speed: 7.5,
            sight_range: 12.0,
            ..Default::default()
        };
        let config = AIConfig::from(&enemy);
        assert_eq!(config.speed, 7.5);
        assert_eq!(config.sight_range, 12.0);
        assert_eq!(config.attack_range, enemy.attack_range);
    }
}
