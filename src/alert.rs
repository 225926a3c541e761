//! Alert partials for displaying success and error messages to users.
//!
//! Alerts are returned by htmx endpoints and swapped into the fixed
//! `#alert-container` element of the base layout.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Alert message types for styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    Success,
    Error,
}

/// An alert message with a short headline and optional details.
#[derive(Debug)]
pub struct Alert<'a> {
    pub kind: AlertKind,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert.
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            kind: AlertKind::Success,
            message,
            details,
        }
    }

    /// Create a new error alert.
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            kind: AlertKind::Error,
            message,
            details,
        }
    }

    /// Render the alert as markup for the alert container.
    pub fn into_html(self) -> Markup {
        let color_style = match self.kind {
            AlertKind::Success => {
                "text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400"
            }
            AlertKind::Error => "text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400",
        };

        html!(
            div
                class={ "flex flex-col p-4 mb-4 rounded-lg shadow " (color_style) }
                role="alert"
            {
                span class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    span class="text-sm" { (self.details) }
                }
            }
        )
    }
}

/// Render an alert partial with the given status code.
///
/// Responses with an error status are swapped into `#alert-container` by
/// the `response-targets` htmx extension.
pub(crate) fn render_alert(status_code: StatusCode, alert: Alert) -> Response {
    (status_code, alert.into_html()).into_response()
}
