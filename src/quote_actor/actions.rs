//! Custom actions for the Quote actor.
//!
//! Handled by the quote's [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action).

/// Operations on a stored quote beyond plain field updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteAction {
    /// Marks the quote primary, or clears the flag. Source resolution prefers the primary quote of
    /// an opportunity.
    SetPrimary(bool),
}
