//=========================================================================
// Game Dialogs
//=========================================================================
//
// Scripts for every speaking character and the outcomes their
// conversations hand back on completion.
//
// Narrative lines end with a hint for the key that continues; questions
// end with the yes/no hint. Scripts are validated when built, so a typo
// in here fails world construction instead of a frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::{sound, Chapel};
use crate::core::dialog::{Chapter, DialogScript};
use crate::core::error::ContentError;
use crate::core::scene::Context;

/// Storage key of the priest's chapter progress.
pub const PRIEST_PROGRESS_KEY: &str = "priestDialog";

fn more(line: &str) -> String {
    format!("{line}  [space to continue]")
}

fn ask(line: &str) -> String {
    format!("{line}  [y / n]")
}

//=== Outcome =============================================================

/// What a finished conversation does to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Leave the church for the forest.
    EnterWorld,

    /// The pilgrims turn on the player.
    BeginHunt,
}

impl Outcome {
    /// Applies the outcome through `ctx`.
    pub fn apply(self, ctx: &mut Context<'_, Chapel>) {
        info!("Conversation outcome: {:?}", self);
        match self {
            Outcome::EnterWorld => {
                ctx.commands().set_scene(Chapel::World);
                ctx.play(sound::CHALLENGE_ACCEPTED);
            }
            Outcome::BeginHunt => {
                let state = ctx.state_mut();
                state.kills = 0;
                state.enemy_mode = true;
                ctx.commands().set_inter_object_collisions(true);
                ctx.play(sound::ATTACK_MODE);
            }
        }
    }
}

//=== Scripts =============================================================

/// The priest's three visits: the plea, the second plea, the last one.
pub fn priest() -> Result<DialogScript, ContentError> {
    DialogScript::new(vec![
        Chapter::new([
            more("Welcome, traveller. Few find this chapel, and fewer leave it."),
            ask("The pilgrims in the forest have stopped praying. Will you go and see why?"),
        ])
        .with_branch(
            more("Bless you. Take the old gun from the sacristy, just in case."),
            more("Then you will sit here with me until the candles burn out."),
        ),
        Chapter::new([ask("You came back. The forest is still restless. Will you try again?")])
            .with_branch(
                more("Courage is a candle. Keep it lit."),
                more("I will pray that you change your mind."),
            ),
        Chapter::new([ask("Again? Very well. Shall I open the doors?")]).with_branch(
            more("Go with care."),
            more("The doors open anyway. They always do."),
        ),
    ])
}

/// One question per pilgrim; every answer leads to the same place.
pub fn pilgrim(index: usize) -> Result<DialogScript, ContentError> {
    const PILGRIMS: [(&str, &str, &str); 6] = [
        (
            "Have you seen the moon tonight?",
            "Look closer. It is watching you.",
            "You will. Everyone does, in the end.",
        ),
        (
            "Do you have family waiting at home?",
            "Then you should not have come here.",
            "Good. Nobody will come looking.",
        ),
        (
            "Would you join our night procession?",
            "We walk until dawn. Some of us further.",
            "The procession joins you instead.",
        ),
        (
            "Do you hear the drum under the trees?",
            "It beats for you now.",
            "Listen harder.",
        ),
        (
            "Did the priest send you?",
            "He sends everyone, sooner or later.",
            "Then who did? It does not matter.",
        ),
        (
            "Are you lost, or are you hunting?",
            "A hunter. How fitting.",
            "Lost things are easiest to find.",
        ),
    ];

    let (question, yes, no) = PILGRIMS[index % PILGRIMS.len()];
    DialogScript::new(vec![Chapter::new([ask(question)]).with_branch(more(yes), more(no))])
}

/// Number of distinct pilgrims.
pub const PILGRIM_COUNT: usize = 6;

/// Spoken in the chapel after the pilgrims caught the player.
pub fn game_over(kills: u32) -> Result<DialogScript, ContentError> {
    let tally = match kills {
        0 => more("They caught you before you stopped a single one."),
        1 => more("They caught you. You stopped one of them."),
        n => more(&format!("They caught you. You stopped {n} of them.")),
    };

    DialogScript::new(vec![Chapter::new([
        tally,
        ask("The forest is still out there. Will you go back?"),
    ])
    .with_branch(
        more("Then walk quickly, and do not look at the moon."),
        more("The forest does not wait for an answer."),
    )])
}

/// The ending, shown line by line.
pub fn ending() -> [String; 3] {
    [
        more("The drums are silent. The pilgrims rest at last."),
        more("Thank you for walking this far with me, through the good nights and the bad."),
        "The chapel is closed. Go in peace.".to_string(),
    ]
}

//=========================================================================
// Unit Tests
//=========================================================================
