//! Prompt construction from the session history.

use std::fmt::Write as _;

use crate::session::SessionRecord;

/// Sentence used instead of a history listing when nothing was recorded.
pub const NO_HISTORY: &str = "The user hasn't recorded any learning sessions yet.";

/// Describe the last `recent` sessions, oldest first.
pub fn session_context(history: &[SessionRecord], recent: usize) -> String {
    if history.is_empty() || recent == 0 {
        return NO_HISTORY.to_string();
    }

    let start = history.len().saturating_sub(recent);
    let mut context = String::from("Here is the user's recent learning history for context:\n");
    for (i, s) in history[start..].iter().enumerate() {
        let _ = writeln!(
            context,
            "- Session {} on {}: Topic: \"{}\", Concentration: {}/5, Mood: {}, Goal Achieved: {}",
            i + 1,
            s.date,
            s.topic,
            s.concentration,
            s.mood,
            s.goal_achieved,
        );
    }
    context
}

/// Full prompt text sent to the model.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "{context}\n\nYou are an AI learning assistant for the app called \"NeuroLearn\", \
         an intelligent Pomodoro timer with you built into it. The user asks: \"{question}\". \
         Please provide helpful, encouraging, and practical advice based on their history. \
         Keep your response short and concise, two or three short paragraphs at most. \
         Be encouraging but direct."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GoalStatus, Mood};

    fn record(date: &str, topic: &str) -> SessionRecord {
        SessionRecord {
            date: date.parse().unwrap(),
            topic: topic.into(),
            concentration: 4,
            mood: Mood::Neutral,
            goal_achieved: GoalStatus::NotYet,
            duration_minutes: None,
        }
    }

    #[test]
    fn empty_history_uses_fixed_sentence() {
        assert_eq!(session_context(&[], 3), NO_HISTORY);
    }

    #[test]
    fn only_most_recent_sessions_are_listed() {
        let history = vec![
            record("2024-05-01", "Math"),
            record("2024-05-02", "Piano"),
            record("2024-05-03", "Physics"),
            record("2024-05-04", "Chess"),
        ];
        let context = session_context(&history, 3);
        assert!(!context.contains("Math"));
        assert!(context.contains(
            "- Session 1 on 2024-05-02: Topic: \"Piano\", Concentration: 4/5, Mood: Neutral, Goal Achieved: not_yet"
        ));
        assert!(context.contains("- Session 3 on 2024-05-04: Topic: \"Chess\""));
    }

    #[test]
    fn prompt_embeds_context_and_question() {
        let prompt = build_prompt(NO_HISTORY, "How do I focus better?");
        assert!(prompt.starts_with(NO_HISTORY));
        assert!(prompt.contains("The user asks: \"How do I focus better?\""));
    }
}
