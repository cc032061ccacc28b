use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        }
    }
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(Uuid),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toasts {
    pub items: Vec<Toast>,
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(toast) => items.push(toast),
            ToastAction::Dismiss(id) => items.retain(|t| t.id != id),
        }
        Rc::new(Toasts { items })
    }
}
