//! The order lifecycle table.

use super::{TransitionRule, TransitionTable};
use crate::core::{Event, State};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Business states of an order.
///
/// Serialized with the same names the backing store keeps in its state
/// column (`CREATED`, `IN_PREPARATION`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Created,
    Paid,
    InPreparation,
    ReadyForDelivery,
    InDelivery,
    Delivered,
    Cancelled,
}

impl OrderState {
    pub const ALL: [OrderState; 7] = [
        OrderState::Created,
        OrderState::Paid,
        OrderState::InPreparation,
        OrderState::ReadyForDelivery,
        OrderState::InDelivery,
        OrderState::Delivered,
        OrderState::Cancelled,
    ];
}

impl State for OrderState {
    fn name(&self) -> &str {
        match self {
            Self::Created => "CREATED",
            Self::Paid => "PAID",
            Self::InPreparation => "IN_PREPARATION",
            Self::ReadyForDelivery => "READY_FOR_DELIVERY",
            Self::InDelivery => "IN_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events that request an order transition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    Pay,
    StartPreparation,
    ReadyForDelivery,
    StartDelivery,
    Deliver,
    Cancel,
}

impl OrderEvent {
    pub const ALL: [OrderEvent; 6] = [
        OrderEvent::Pay,
        OrderEvent::StartPreparation,
        OrderEvent::ReadyForDelivery,
        OrderEvent::StartDelivery,
        OrderEvent::Deliver,
        OrderEvent::Cancel,
    ];
}

impl Event for OrderEvent {
    fn name(&self) -> &str {
        match self {
            Self::Pay => "PAY",
            Self::StartPreparation => "START_PREPARATION",
            Self::ReadyForDelivery => "READY_FOR_DELIVERY",
            Self::StartDelivery => "START_DELIVERY",
            Self::Deliver => "DELIVER",
            Self::Cancel => "CANCEL",
        }
    }
}

impl fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every legal order transition, in enumeration order.
///
/// Cancel is only accepted before preparation finishes.
pub static ORDER_RULES: [TransitionRule<OrderState, OrderEvent>; 8] = [
    TransitionRule::new(OrderState::Created, OrderEvent::Pay, OrderState::Paid),
    TransitionRule::new(
        OrderState::Paid,
        OrderEvent::StartPreparation,
        OrderState::InPreparation,
    ),
    TransitionRule::new(
        OrderState::InPreparation,
        OrderEvent::ReadyForDelivery,
        OrderState::ReadyForDelivery,
    ),
    TransitionRule::new(
        OrderState::ReadyForDelivery,
        OrderEvent::StartDelivery,
        OrderState::InDelivery,
    ),
    TransitionRule::new(
        OrderState::InDelivery,
        OrderEvent::Deliver,
        OrderState::Delivered,
    ),
    TransitionRule::new(
        OrderState::Created,
        OrderEvent::Cancel,
        OrderState::Cancelled,
    ),
    TransitionRule::new(OrderState::Paid, OrderEvent::Cancel, OrderState::Cancelled),
    TransitionRule::new(
        OrderState::InPreparation,
        OrderEvent::Cancel,
        OrderState::Cancelled,
    ),
];

/// Transition table for the order lifecycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderTable;

impl TransitionTable for OrderTable {
    type State = OrderState;
    type Event = OrderEvent;

    fn initial(&self) -> OrderState {
        OrderState::Created
    }

    fn states(&self) -> &[OrderState] {
        &OrderState::ALL
    }

    fn rules(&self) -> &[TransitionRule<OrderState, OrderEvent>] {
        &ORDER_RULES
    }
}
