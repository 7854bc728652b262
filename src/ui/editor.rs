use crate::calc::dates::{self, LONG_DATE_FORMAT};
use crate::data::ScheduleMap;
use chrono::NaiveDate;

/// Modal state for creating, editing and deleting schedule entries.
///
/// `editing_index == None` while open means create mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorState {
    pub open: bool,
    pub selected_day: Option<NaiveDate>,
    pub draft: String,
    pub editing_index: Option<usize>,
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_editing(&self) -> bool {
        self.open && self.editing_index.is_some()
    }

    /// Opens in create mode on `day` with an empty draft.
    pub fn open_create(&mut self, day: NaiveDate) {
        *self = EditorState {
            open: true,
            selected_day: Some(day),
            draft: String::new(),
            editing_index: None,
        };
        tracing::debug!(day = %day, "editor opened (create)");
    }

    /// Opens in edit mode on entry `index` of `day`, pre-filled with its text.
    /// Does nothing if there is no such entry.
    pub fn open_edit(&mut self, schedule: &ScheduleMap, day: NaiveDate, index: usize) {
        let Some(text) = schedule.entries(day).get(index) else {
            return;
        };
        *self = EditorState {
            open: true,
            selected_day: Some(day),
            draft: text.clone(),
            editing_index: Some(index),
        };
        tracing::debug!(day = %day, index, "editor opened (edit)");
    }

    pub fn close(&mut self) {
        *self = EditorState::default();
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop_char(&mut self) {
        self.draft.pop();
    }

    /// Applies the draft to the store and closes. Drafts are stored as typed,
    /// including empty ones.
    pub fn submit(&mut self, schedule: &mut ScheduleMap) {
        let Some(day) = self.selected_day else {
            return;
        };
        let text = std::mem::take(&mut self.draft);
        match self.editing_index {
            Some(index) => {
                schedule.update_at(day, index, text);
            }
            None => schedule.append(day, text),
        }
        self.close();
    }

    /// Deletes the entry being edited and closes. No-op in create mode.
    pub fn delete(&mut self, schedule: &mut ScheduleMap) {
        let (Some(day), Some(index)) = (self.selected_day, self.editing_index) else {
            return;
        };
        schedule.delete_at(day, index);
        self.close();
    }

    pub fn title(&self) -> String {
        self.selected_day
            .map(|d| dates::format_date(d, LONG_DATE_FORMAT))
            .unwrap_or_default()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing_index.is_some() {
            "Update"
        } else {
            "Register"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn type_text(editor: &mut EditorState, text: &str) {
        for c in text.chars() {
            editor.push_char(c);
        }
    }

    #[test]
    fn test_default_is_closed_and_empty() {
        let editor = EditorState::default();
        assert!(!editor.is_open());
        assert_eq!(editor.selected_day, None);
        assert!(editor.draft.is_empty());
        assert_eq!(editor.editing_index, None);
    }

    #[test]
    fn test_create_submit_appends_and_closes() {
        let mut schedule = ScheduleMap::default();
        let mut editor = EditorState::default();
        editor.open_create(d(2024, 6, 15));
        assert_eq!(editor.submit_label(), "Register");
        type_text(&mut editor, "Dentist");
        editor.submit(&mut schedule);

        assert_eq!(schedule.entries(d(2024, 6, 15)), ["Dentist"]);
        assert_eq!(editor, EditorState::default());
    }

    #[test]
    fn test_create_submit_empty_draft_is_stored() {
        let mut schedule = ScheduleMap::default();
        let mut editor = EditorState::default();
        editor.open_create(d(2024, 6, 15));
        editor.submit(&mut schedule);
        assert_eq!(schedule.entries(d(2024, 6, 15)), [""]);
    }

    #[test]
    fn test_edit_prefills_and_updates_in_place() {
        let mut schedule = ScheduleMap::default();
        let day = d(2024, 6, 15);
        schedule.append(day, "Gym");
        schedule.append(day, "Dentist");

        let mut editor = EditorState::default();
        editor.open_edit(&schedule, day, 1);
        assert!(editor.is_editing());
        assert_eq!(editor.draft, "Dentist");
        assert_eq!(editor.submit_label(), "Update");

        editor.pop_char();
        editor.pop_char();
        editor.pop_char();
        type_text(&mut editor, "al visit");
        editor.submit(&mut schedule);

        assert_eq!(schedule.entries(day), ["Gym", "Dental visit"]);
        assert!(!editor.is_open());
    }

    #[test]
    fn test_edit_delete_removes_entry_and_closes() {
        let mut schedule = ScheduleMap::default();
        let day = d(2024, 6, 15);
        schedule.append(day, "Only");

        let mut editor = EditorState::default();
        editor.open_edit(&schedule, day, 0);
        editor.delete(&mut schedule);

        assert!(!schedule.contains_day(day));
        assert_eq!(editor, EditorState::default());
    }

    #[test]
    fn test_delete_in_create_mode_does_nothing() {
        let mut schedule = ScheduleMap::default();
        let day = d(2024, 6, 15);
        schedule.append(day, "Keep");

        let mut editor = EditorState::default();
        editor.open_create(day);
        editor.delete(&mut schedule);

        assert_eq!(schedule.entries(day), ["Keep"]);
        assert!(editor.is_open());
    }

    #[test]
    fn test_open_edit_without_entry_is_ignored() {
        let schedule = ScheduleMap::default();
        let mut editor = EditorState::default();
        editor.open_edit(&schedule, d(2024, 6, 15), 0);
        assert!(!editor.is_open());
    }

    #[test]
    fn test_close_resets_everything() {
        let mut schedule = ScheduleMap::default();
        schedule.append(d(2024, 6, 15), "Gym");
        let mut editor = EditorState::default();
        editor.open_edit(&schedule, d(2024, 6, 15), 0);
        type_text(&mut editor, "!!");
        editor.close();
        assert_eq!(editor, EditorState::default());
        assert_eq!(schedule.entries(d(2024, 6, 15)), ["Gym"]);
    }

    #[test]
    fn test_reopen_while_open_matches_close_then_open() {
        let mut schedule = ScheduleMap::default();
        schedule.append(d(2024, 6, 15), "Gym");

        let mut reopened = EditorState::default();
        reopened.open_edit(&schedule, d(2024, 6, 15), 0);
        reopened.open_create(d(2024, 6, 20));

        let mut fresh = EditorState::default();
        fresh.open_create(d(2024, 6, 20));

        assert_eq!(reopened, fresh);
    }

    #[test]
    fn test_title_uses_long_date() {
        let mut editor = EditorState::default();
        assert_eq!(editor.title(), "");
        editor.open_create(d(2024, 6, 15));
        assert_eq!(editor.title(), "June 15, 2024");
    }
}
