//! Action hiding: relabelling chosen actions to τ.

use indexmap::IndexSet;

use crate::label::Label;
use crate::lts::Lts;

/// Returns a clone of `lts` in which every edge whose action is in
/// `actions` carries τ instead. Actions are matched by bare name, so a
/// broadcast `!a` and a listener `?a` are both hidden by `a`.
pub fn hide(lts: &Lts, actions: &IndexSet<String>) -> Lts {
    let mut out = lts.clone();
    for edge in out.edges_mut() {
        if edge.label.bare().is_some_and(|bare| actions.contains(bare)) {
            edge.label = Label::Tau;
        }
    }
    out
}
