// Discord commands module.
// Each command group gets its own file.

use crate::discord::{Data, Error};

pub mod alert;
pub mod campaign;
pub mod moderation;

/// Every slash command the bot registers.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        campaign::campaign(),
        alert::alert(),
        moderation::moderation(),
    ]
}
