//! Conversation cache mutations over a plain [`AppState`].
//!
//! Each function either fully applies or does nothing; the [`Store`](crate::Store)
//! runs them under its lock and only notifies subscribers when they report a
//! change.

use parley_types::{AppState, Conversation, Message};

/// Insert at the front and make it current. Duplicate ids are not checked.
pub fn create(state: &mut AppState, conversation: Conversation) {
    state.current_conversation_id = Some(conversation.id.clone());
    state.conversations.insert(0, conversation);
}

/// Remove every conversation with `id`.
///
/// When the removed conversation was current, the pointer moves to the new
/// front of the list (or clears when the list is empty). Returns whether
/// anything was removed.
pub fn delete(state: &mut AppState, id: &str) -> bool {
    let before = state.conversations.len();
    state.conversations.retain(|c| c.id != id);
    if state.conversations.len() == before {
        return false;
    }

    if state.current_conversation_id.as_deref() == Some(id) {
        state.current_conversation_id = state.conversations.first().map(|c| c.id.clone());
    }
    true
}

/// Point at `id`, whether or not it exists
pub fn set_current(state: &mut AppState, id: impl Into<String>) {
    state.current_conversation_id = Some(id.into());
}

/// Append to the conversation with `id`. Returns `false` for an unknown id.
pub fn append_message(state: &mut AppState, id: &str, message: Message) -> bool {
    match state.conversation_mut(id) {
        Some(conversation) => {
            conversation.push_message(message);
            true
        }
        None => false,
    }
}

/// Drop every conversation and the current pointer
pub fn clear(state: &mut AppState) {
    state.conversations.clear();
    state.current_conversation_id = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn state_with(ids: &[&str]) -> AppState {
        let mut state = AppState::default();
        for id in ids.iter().rev() {
            create(&mut state, Conversation::new(*id));
        }
        state
    }

    fn ids(state: &AppState) -> Vec<&str> {
        state.conversations.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_create_inserts_at_front_and_selects() {
        let mut state = state_with(&["a"]);
        create(&mut state, Conversation::new("b"));

        assert_eq!(ids(&state), vec!["b", "a"]);
        assert_eq!(state.current_conversation_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_create_allows_duplicate_ids() {
        let mut state = state_with(&["a"]);
        create(&mut state, Conversation::new("a"));
        assert_eq!(state.conversations.len(), 2);
    }

    #[test]
    fn test_delete_current_moves_to_new_front() {
        let mut state = state_with(&["a", "b", "c"]);
        set_current(&mut state, "b");

        assert!(delete(&mut state, "b"));
        assert_eq!(ids(&state), vec!["a", "c"]);
        assert_eq!(state.current_conversation_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_delete_front_current_picks_next() {
        let mut state = state_with(&["a", "b"]);
        set_current(&mut state, "a");

        delete(&mut state, "a");
        assert_eq!(state.current_conversation_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_delete_last_clears_pointer() {
        let mut state = state_with(&["a"]);
        assert!(delete(&mut state, "a"));
        assert!(state.conversations.is_empty());
        assert_eq!(state.current_conversation_id, None);
    }

    #[test]
    fn test_delete_other_keeps_pointer() {
        let mut state = state_with(&["a", "b", "c"]);
        set_current(&mut state, "a");

        delete(&mut state, "c");
        assert_eq!(state.current_conversation_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut state = state_with(&["a", "b"]);
        set_current(&mut state, "b");
        let before = state.clone();

        assert!(!delete(&mut state, "zzz"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_set_current_accepts_unknown_id() {
        let mut state = state_with(&["a"]);
        set_current(&mut state, "ghost");

        assert_eq!(state.current_conversation_id.as_deref(), Some("ghost"));
        assert!(state.current_conversation().is_none());
    }

    #[test]
    fn test_append_titles_once_and_bumps_updated_at() {
        let mut state = state_with(&["a"]);
        let created = state.conversations[0].created_at;

        assert!(append_message(&mut state, "a", Message::user("What is ownership?")));
        assert!(append_message(&mut state, "a", Message::assistant("It is a set of rules")));

        let conv = &state.conversations[0];
        assert_eq!(conv.title, "What is ownership?");
        assert_eq!(conv.messages.len(), 2);
        assert!(conv.updated_at >= created);
    }

    #[test]
    fn test_append_never_moves_updated_before_created() {
        let mut state = AppState::default();
        let future = Utc::now() + Duration::hours(1);
        create(&mut state, Conversation::stub("f", "Future", future, future));

        append_message(&mut state, "f", Message::user("hi"));
        let conv = &state.conversations[0];
        assert!(conv.updated_at >= conv.created_at);
    }

    #[test]
    fn test_append_to_unknown_is_noop() {
        let mut state = state_with(&["a"]);
        let before = state.clone();

        assert!(!append_message(&mut state, "missing", Message::user("hi")));
        assert_eq!(state, before);
    }

    #[test]
    fn test_clear() {
        let mut state = state_with(&["a", "b"]);
        clear(&mut state);

        assert!(state.conversations.is_empty());
        assert_eq!(state.current_conversation_id, None);
    }
}
