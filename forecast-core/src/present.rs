//! Presentation adapters over a [`DisplayModel`].

use std::fmt::Write;

use anyhow::Context;
use serde::Serialize;

use crate::{
    render::{Condition, DisplayLine, DisplayModel},
    theme::AppState,
};

pub trait Presenter {
    fn present(&self, model: &DisplayModel, state: &AppState) -> anyhow::Result<String>;

    /// Render a user-facing error message.
    fn present_message(&self, message: &str, state: &AppState) -> String;
}

/// Plain terminal output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn present(&self, model: &DisplayModel, _state: &AppState) -> anyhow::Result<String> {
        let mut out = String::new();

        writeln!(out, "{}", model.current.heading)?;
        writeln!(out, "{}", model.current.condition.text)?;
        write_lines(&mut out, &model.current.lines, "  ")?;

        writeln!(out)?;
        writeln!(out, "{}", model.forecast_title)?;
        for day in &model.days {
            writeln!(out, "\n  {} - {}", day.date, day.condition.text)?;
            write_lines(&mut out, &day.lines, "    ")?;
        }

        Ok(out)
    }

    fn present_message(&self, message: &str, _state: &AppState) -> String {
        message.to_string()
    }
}

fn write_lines(out: &mut String, lines: &[DisplayLine], indent: &str) -> std::fmt::Result {
    for line in lines {
        writeln!(out, "{indent}{}: {}", line.label, line.value)?;
    }
    Ok(())
}

/// The markup the browser client used, wrapped in a mode-classed container.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlPresenter;

impl Presenter for HtmlPresenter {
    fn present(&self, model: &DisplayModel, state: &AppState) -> anyhow::Result<String> {
        let mut out = String::new();

        writeln!(out, "<div class=\"{}\">", state.mode.css_class())?;
        writeln!(out, "<h2>{}</h2>", escape(&model.current.heading))?;
        writeln!(
            out,
            "<p class=\"weatherHeading\">{} <span>{}</span></p>",
            icon(&model.current.condition),
            escape(&model.current.condition.text)
        )?;
        write_list(&mut out, &model.current.lines)?;

        writeln!(out, "<h3>{}</h3>", escape(&model.forecast_title))?;
        writeln!(out, "<div class=\"daily-grid\">")?;
        for day in &model.days {
            writeln!(out, "<div class=\"daily-card\">")?;
            writeln!(out, "<h4>{}</h4>", escape(&day.date))?;
            writeln!(
                out,
                "<p class=\"weatherHeading\">{} {}</p>",
                icon(&day.condition),
                escape(&day.condition.text)
            )?;
            write_list(&mut out, &day.lines)?;
            writeln!(out, "</div>")?;
        }
        writeln!(out, "</div>")?;
        writeln!(out, "</div>")?;

        Ok(out)
    }

    fn present_message(&self, message: &str, state: &AppState) -> String {
        format!("<div class=\"{}\"><p>{}</p></div>\n", state.mode.css_class(), escape(message))
    }
}

fn icon(condition: &Condition) -> String {
    format!("<img src=\"{}\" alt=\"{}\">", escape(&condition.icon_url), escape(&condition.text))
}

fn write_list(out: &mut String, lines: &[DisplayLine]) -> std::fmt::Result {
    writeln!(out, "<ul>")?;
    for line in lines {
        writeln!(out, "<li>{}: {}</li>", line.label, escape(&line.value))?;
    }
    writeln!(out, "</ul>")
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPresenter;

#[derive(Serialize)]
struct JsonEnvelope<'a, T: Serialize> {
    mode: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Serialize)]
struct JsonMessage<'a> {
    error: &'a str,
}

impl Presenter for JsonPresenter {
    fn present(&self, model: &DisplayModel, state: &AppState) -> anyhow::Result<String> {
        let envelope = JsonEnvelope { mode: state.mode.as_str(), body: model };
        serde_json::to_string_pretty(&envelope).context("Failed to serialize forecast to JSON")
    }

    fn present_message(&self, message: &str, state: &AppState) -> String {
        let envelope = JsonEnvelope { mode: state.mode.as_str(), body: &JsonMessage { error: message } };
        serde_json::to_string(&envelope)
            .unwrap_or_else(|_| format!("{{\"error\":{message:?}}}"))
    }
}
