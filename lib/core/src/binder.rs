//! One selection cell bound to the view that renders its widget.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::DataStore;
use crate::Result;

/// Display widgets driven by a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    AuthorTable,
    ConfidenceChart,
    WordTable,
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Widget::AuthorTable => "author_table",
            Widget::ConfidenceChart => "confidence_chart",
            Widget::WordTable => "word_table",
        };
        f.write_str(name)
    }
}

/// Outcome of a selection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refresh {
    /// The widget was recomputed from the new selection
    Recomputed,
    /// The event carried no value; the widget keeps its content
    Skipped,
}

pub type ViewFn<S, O> = fn(&DataStore, &S) -> Result<O>;

/// A selection cell and the widget content derived from it.
///
/// The binding is 1:1: a change of `selection` recomputes exactly this
/// binding's `displayed` value and nothing else. A failed recompute leaves
/// both the selection and the displayed value as they were.
pub struct Binding<S, O> {
    widget: Widget,
    selection: S,
    displayed: O,
    view: ViewFn<S, O>,
}

impl<S: fmt::Debug, O> Binding<S, O> {
    /// Bind `initial` and render it once.
    pub fn new(store: &DataStore, widget: Widget, initial: S, view: ViewFn<S, O>) -> Result<Self> {
        let displayed = view(store, &initial)?;
        Ok(Self {
            widget,
            selection: initial,
            displayed,
            view,
        })
    }

    /// Select `value` and recompute the widget.
    pub fn select(&mut self, store: &DataStore, value: S) -> Result<&O> {
        match (self.view)(store, &value) {
            Ok(displayed) => {
                tracing::debug!(widget = %self.widget, selection = ?value, "widget recomputed");
                self.selection = value;
                self.displayed = displayed;
                Ok(&self.displayed)
            }
            Err(e) => {
                tracing::debug!(widget = %self.widget, selection = ?value, error = %e, "selection rejected");
                Err(e)
            }
        }
    }

    /// Like [`Binding::select`], but an empty event keeps the current content.
    pub fn select_if_present(&mut self, store: &DataStore, value: Option<S>) -> Result<Refresh> {
        match value {
            Some(v) => self.select(store, v).map(|_| Refresh::Recomputed),
            None => {
                tracing::debug!(widget = %self.widget, "empty selection ignored");
                Ok(Refresh::Skipped)
            }
        }
    }

    #[inline]
    pub fn widget(&self) -> Widget {
        self.widget
    }

    #[inline]
    pub fn selection(&self) -> &S {
        &self.selection
    }

    #[inline]
    pub fn displayed(&self) -> &O {
        &self.displayed
    }
}
