//! Stable snapshot hashing for deterministic verification.
//! Replays and resumed sessions compare this value instead of whole snapshots.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.next_input_seq);
        write_state(&mut hasher, &self.state);
        hasher.finish()
    }
}

/// Hash of the state alone, independent of seed and input count.
pub fn state_hash(state: &GameState) -> u64 {
    let mut hasher = Xxh3::new();
    write_state(&mut hasher, state);
    hasher.finish()
}

fn write_state(hasher: &mut Xxh3, state: &GameState) {
    hasher.write_u8(state.level);
    hasher.write_usize(state.questions.len());
    for question in &state.questions {
        write_question(hasher, question);
    }
    hasher.write_usize(state.current_question_index);
    hasher.write_usize(state.seen_question_ids.len());
    for id in &state.seen_question_ids {
        write_str(hasher, id);
    }
    hasher.write_usize(state.eliminated_choices.len());
    for index in &state.eliminated_choices {
        hasher.write_u8(*index);
    }
    hasher.write_u8(state.locked_choice.unwrap_or(u8::MAX));
    hasher.write_u8(u8::from(state.answered));
    hasher.write_u8(match state.correct {
        None => 0,
        Some(false) => 1,
        Some(true) => 2,
    });
    match state.poll_results {
        Some(poll) => {
            hasher.write_u8(1);
            for percentage in poll {
                hasher.write_i32(percentage);
            }
        }
        None => hasher.write_u8(0),
    }
    hasher.write_u32(state.remaining_time);
    hasher.write_u8(u8::from(state.info_message.is_some()));
    hasher.write_u32(state.winnings);
    hasher.write_u8(state.last_safe_level);
    hasher.write_u8(u8::from(state.game_over));
    hasher.write_u8(u8::from(state.used_lifelines.fifty_fifty));
    hasher.write_u8(u8::from(state.used_lifelines.audience));
    hasher.write_u8(u8::from(state.used_lifelines.switch));
}

/// Everything that decides how the card plays, so an edited answer key changes the hash.
fn write_question(hasher: &mut Xxh3, question: &Question) {
    write_str(hasher, &question.id);
    write_str(hasher, question.difficulty.as_str());
    write_str(hasher, &question.prompt);
    for choice in &question.choices {
        write_str(hasher, choice);
    }
    hasher.write_u8(question.correct_index);
}

fn write_str(hasher: &mut Xxh3, value: &str) {
    hasher.write_usize(value.len());
    hasher.write(value.as_bytes());
}
