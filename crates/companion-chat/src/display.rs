//! Chat display collaborator.
//!
//! The display owns the conversation history; the interaction core only hands
//! it resolved exchanges, in whatever order they complete.

use companion_core::ExchangeId;

use crate::types::ChatDelivery;

/// Receives resolved exchanges.
pub trait ChatDisplay: Send {
    fn deliver(&mut self, delivery: ChatDelivery);
}

/// In-memory history of delivered exchanges, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    entries: Vec<ChatDelivery>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChatDelivery] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ChatDelivery> {
        self.entries.last()
    }

    pub fn find(&self, exchange_id: ExchangeId) -> Option<&ChatDelivery> {
        self.entries.iter().find(|d| d.exchange_id == exchange_id)
    }
}

impl ChatDisplay for ChatLog {
    fn deliver(&mut self, delivery: ChatDelivery) {
        self.entries.push(delivery);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatExchange;
    use companion_core::{ConversationMode, UserId};

    #[test]
    fn test_log_keeps_delivery_order() {
        let first = ChatExchange::new(UserId::default(), ConversationMode::Personal, "one");
        let second = ChatExchange::new(UserId::default(), ConversationMode::Personal, "two");
        let (first_id, second_id) = (first.id, second.id);

        let mut log = ChatLog::new();
        assert!(log.is_empty());
        log.deliver(second.resolve("reply two".to_string()));
        log.deliver(first.resolve("reply one".to_string()));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].exchange_id, second_id);
        assert_eq!(log.last().unwrap().exchange_id, first_id);
        assert_eq!(log.find(first_id).unwrap().response_text, "reply one");
        assert!(log.find(ExchangeId::new()).is_none());
    }
}
