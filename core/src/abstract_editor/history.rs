//! Undo/redo action history.
//!
//! [`EditActionHistory`] manages a linear undo/redo stack of [`EditAction`]
//! trait objects. Pushing a new action after undoing discards the redo stack.

use std::collections::VecDeque;
use std::fmt;

use super::action::{EditAction, EditActionError, EditActionResult, Editable};

/// Default maximum number of undo steps.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// Manages an undo/redo stack of editor actions.
///
/// The undo stack is bounded by `max_undo`; once full, the oldest entry is
/// dropped from the front. Undo, redo and merge-breaking transient actions
/// close the top entry so later actions never merge into it.
///
/// # Example
///
/// ```ignore
/// let mut history = EditActionHistory::new(DEFAULT_MAX_UNDO);
/// history.execute(Box::new(SetActiveAction::all(nodes, false, "Isolate")), &mut scene)?;
/// history.undo(&mut scene)?;
/// history.redo(&mut scene)?;
/// ```
pub struct EditActionHistory<T: Editable> {
    undo_stack: VecDeque<Box<dyn EditAction<T>>>,
    redo_stack: Vec<Box<dyn EditAction<T>>>,
    max_undo: usize,
    merge_broken: bool,
}

impl<T: Editable> EditActionHistory<T> {
    /// Creates a new empty history with the given maximum undo depth.
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo,
            merge_broken: false,
        }
    }

    /// Applies an action to the target and, if it is
    /// [recorded](EditAction::is_recorded), pushes it onto the undo stack.
    ///
    /// Recorded actions clear the redo stack and try to
    /// [merge](EditAction::merge) into the top undo entry. A failing action
    /// is never pushed.
    pub fn execute(
        &mut self,
        mut action: Box<dyn EditAction<T>>,
        target: &mut T,
    ) -> EditActionResult {
        action.apply(target)?;

        if !action.is_recorded() {
            if action.breaks_merge() {
                self.merge_broken = true;
            }
            return Ok(());
        }

        self.redo_stack.clear();

        if !self.merge_broken
            && let Some(last) = self.undo_stack.back_mut()
        {
            match last.merge(action) {
                None => return Ok(()),
                Some(returned) => action = returned,
            }
        }
        self.merge_broken = false;

        log::debug!("history: recorded \"{}\"", action.description());
        self.undo_stack.push_back(action);
        self.trim();
        Ok(())
    }

    /// Undoes the most recent action.
    pub fn undo(&mut self, target: &mut T) -> EditActionResult {
        let mut action = self
            .undo_stack
            .pop_back()
            .ok_or(EditActionError::EmptyStack("undo"))?;
        if let Err(e) = action.undo(target) {
            self.undo_stack.push_back(action);
            return Err(e);
        }
        log::debug!("history: undo \"{}\"", action.description());
        self.redo_stack.push(action);
        // The entry now on top was finished before the undo.
        self.merge_broken = true;
        Ok(())
    }

    /// Redoes the most recently undone action.
    pub fn redo(&mut self, target: &mut T) -> EditActionResult {
        let mut action = self
            .redo_stack
            .pop()
            .ok_or(EditActionError::EmptyStack("redo"))?;
        if let Err(e) = action.apply(target) {
            self.redo_stack.push(action);
            return Err(e);
        }
        log::debug!("history: redo \"{}\"", action.description());
        self.undo_stack.push_back(action);
        self.merge_broken = true;
        self.trim();
        Ok(())
    }

    fn trim(&mut self) {
        while self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
    }

    /// Returns `true` if there are actions that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns `true` if there are actions that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo descriptions, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(|a| a.description())
    }

    /// Redo descriptions, most recent first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(|a| a.description())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_undo(&self) -> usize {
        self.max_undo
    }

    /// Clears both stacks and resets the merge-broken flag.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.merge_broken = false;
    }
}

impl<T: Editable> Default for EditActionHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}

impl<T: Editable> fmt::Debug for EditActionHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditActionHistory")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("max_undo", &self.max_undo)
            .field("merge_broken", &self.merge_broken)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A row of switches, standing in for node active flags.
    struct Panel {
        switches: Vec<bool>,
    }

    impl Editable for Panel {}

    #[derive(Debug)]
    struct Flip {
        index: usize,
    }

    impl EditAction<Panel> for Flip {
        fn apply(&mut self, target: &mut Panel) -> EditActionResult {
            let slot = target
                .switches
                .get_mut(self.index)
                .ok_or_else(|| EditActionError::TargetNotFound(self.index.to_string()))?;
            *slot = !*slot;
            Ok(())
        }

        fn undo(&mut self, target: &mut Panel) -> EditActionResult {
            self.apply(target)
        }

        fn description(&self) -> &str {
            "Flip"
        }
    }

    /// Consecutive writes to the same switch collapse into one undo step.
    #[derive(Debug)]
    struct Write {
        index: usize,
        old: bool,
        new: bool,
    }

    impl EditAction<Panel> for Write {
        fn apply(&mut self, target: &mut Panel) -> EditActionResult {
            target.switches[self.index] = self.new;
            Ok(())
        }

        fn undo(&mut self, target: &mut Panel) -> EditActionResult {
            target.switches[self.index] = self.old;
            Ok(())
        }

        fn description(&self) -> &str {
            "Write"
        }

        fn merge(
            &mut self,
            other: Box<dyn EditAction<Panel>>,
        ) -> Option<Box<dyn EditAction<Panel>>> {
            if let Some(next) = (*other).as_any().downcast_ref::<Write>()
                && next.index == self.index
            {
                self.new = next.new;
                return None;
            }
            Some(other)
        }
    }

    /// Transient action, like the play-mode visibility flip.
    #[derive(Debug)]
    struct Transient {
        breaks: bool,
    }

    impl EditAction<Panel> for Transient {
        fn apply(&mut self, _target: &mut Panel) -> EditActionResult {
            Ok(())
        }

        fn undo(&mut self, _target: &mut Panel) -> EditActionResult {
            unreachable!("non-recorded actions are never undone");
        }

        fn description(&self) -> &str {
            "Transient"
        }

        fn is_recorded(&self) -> bool {
            false
        }

        fn breaks_merge(&self) -> bool {
            self.breaks
        }
    }

    fn panel() -> Panel {
        Panel {
            switches: vec![true, true, true],
        }
    }

    #[test]
    fn execute_undo_redo() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();

        history.execute(Box::new(Flip { index: 1 }), &mut panel).unwrap();
        assert_eq!(panel.switches, vec![true, false, true]);
        assert_eq!(history.undo_count(), 1);

        history.undo(&mut panel).unwrap();
        assert_eq!(panel.switches, vec![true, true, true]);
        assert!(history.can_redo());

        history.redo(&mut panel).unwrap();
        assert_eq!(panel.switches, vec![true, false, true]);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn empty_stacks_report_errors() {
        let mut history = EditActionHistory::<Panel>::default();
        let mut panel = panel();
        assert_eq!(
            history.undo(&mut panel),
            Err(EditActionError::EmptyStack("undo"))
        );
        assert_eq!(
            history.redo(&mut panel),
            Err(EditActionError::EmptyStack("redo"))
        );
    }

    #[test]
    fn failed_action_is_not_recorded() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();
        let result = history.execute(Box::new(Flip { index: 9 }), &mut panel);
        assert!(matches!(result, Err(EditActionError::TargetNotFound(_))));
        assert_eq!(history.undo_count(), 0);
    }

    #[test]
    fn new_action_clears_redo() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();
        history.execute(Box::new(Flip { index: 0 }), &mut panel).unwrap();
        history.undo(&mut panel).unwrap();
        history.execute(Box::new(Flip { index: 2 }), &mut panel).unwrap();
        assert!(!history.can_redo());
        assert_eq!(panel.switches, vec![true, true, false]);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut history = EditActionHistory::new(2);
        let mut panel = panel();
        for index in 0..3 {
            history.execute(Box::new(Flip { index }), &mut panel).unwrap();
        }
        assert_eq!(history.undo_count(), 2);
        history.undo(&mut panel).unwrap();
        history.undo(&mut panel).unwrap();
        assert!(history.undo(&mut panel).is_err());
        // The first flip fell off the stack and stays applied.
        assert_eq!(panel.switches, vec![false, true, true]);
    }

    #[test]
    fn mergeable_actions_collapse() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();
        history
            .execute(Box::new(Write { index: 0, old: true, new: false }), &mut panel)
            .unwrap();
        history
            .execute(Box::new(Write { index: 0, old: false, new: true }), &mut panel)
            .unwrap();
        history
            .execute(Box::new(Write { index: 0, old: true, new: false }), &mut panel)
            .unwrap();
        assert_eq!(history.undo_count(), 1);

        history.undo(&mut panel).unwrap();
        assert!(panel.switches[0]);
    }

    #[test]
    fn transient_action_is_applied_but_not_recorded() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();
        history
            .execute(Box::new(Transient { breaks: false }), &mut panel)
            .unwrap();
        assert_eq!(history.undo_count(), 0);
    }

    #[test]
    fn merge_breaking_transient_separates_entries() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();
        history
            .execute(Box::new(Write { index: 1, old: true, new: false }), &mut panel)
            .unwrap();
        history
            .execute(Box::new(Transient { breaks: true }), &mut panel)
            .unwrap();
        history
            .execute(Box::new(Write { index: 1, old: false, new: true }), &mut panel)
            .unwrap();
        assert_eq!(history.undo_count(), 2);
    }

    #[test]
    fn undo_and_redo_stop_merging() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();
        let write = |old, new| Box::new(Write { index: 0, old, new });
        history.execute(write(true, false), &mut panel).unwrap();
        history.execute(Box::new(Flip { index: 1 }), &mut panel).unwrap();
        history.undo(&mut panel).unwrap();
        history.execute(write(false, true), &mut panel).unwrap();
        assert_eq!(history.undo_count(), 2);

        history.undo(&mut panel).unwrap();
        history.redo(&mut panel).unwrap();
        history.execute(write(true, false), &mut panel).unwrap();
        assert_eq!(history.undo_count(), 3);

        history.undo(&mut panel).unwrap();
        assert!(panel.switches[0]);
    }

    #[test]
    fn descriptions_most_recent_first() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();
        history.execute(Box::new(Flip { index: 0 }), &mut panel).unwrap();
        history
            .execute(Box::new(Write { index: 2, old: true, new: false }), &mut panel)
            .unwrap();
        let undo: Vec<_> = history.undo_descriptions().collect();
        assert_eq!(undo, vec!["Write", "Flip"]);

        history.undo(&mut panel).unwrap();
        let redo: Vec<_> = history.redo_descriptions().collect();
        assert_eq!(redo, vec!["Write"]);
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut history = EditActionHistory::default();
        let mut panel = panel();
        history.execute(Box::new(Flip { index: 0 }), &mut panel).unwrap();
        history.execute(Box::new(Flip { index: 1 }), &mut panel).unwrap();
        history.undo(&mut panel).unwrap();
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.max_undo(), DEFAULT_MAX_UNDO);
    }

    #[test]
    fn debug_impl() {
        let history = EditActionHistory::<Panel>::new(7);
        let debug = format!("{history:?}");
        assert!(debug.contains("EditActionHistory"));
        assert!(debug.contains("max_undo: 7"));
    }
}
