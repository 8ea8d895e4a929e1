//! ECS компоненты персонажей
//!
//! - character: боевое состояние (health, death, cooldown) + конфиг
//! - animator: сигналы для анимационной системы
//! - player: player control marker

pub mod animator;
pub mod character;
pub mod player;

pub use animator::*;
pub use character::*;
pub use player::*;
