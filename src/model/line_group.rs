//! A named group of lines on one quote.
use super::ids::{GroupId, QuoteId};

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLineGroup {
    pub id: GroupId,
    pub quote: QuoteId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuoteLineGroupCreate {
    pub quote: QuoteId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuoteLineGroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
