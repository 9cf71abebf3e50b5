// Rust Picker demo
// Replays a scripted picker session and prints every callback as a JSON line

use std::cell::RefCell;
use std::fs;
use std::io::{self, Read};
use std::rc::Rc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use rust_picker::models::action::ChangeContext;
use rust_picker::models::error::SingleError;
use rust_picker::models::value::SingleValue;
use rust_picker::services::settings::SettingsService;
use rust_picker::services::surface::PickerSurface;
use rust_picker::services::validation::DateValidator;
use rust_picker::{
    ChangeImportance, ChronoAdapter, FieldChangeContext, PickerHandle, PickerShortcut,
    PickerValueController, PublicSurfaceBuilder, SelectionState, SingleValueManager,
};

#[derive(Debug, Serialize)]
struct DemoEvent {
    event: &'static str,
    value: Option<String>,
    error: SingleError,
    shortcut: Option<String>,
}

impl DemoEvent {
    fn from_change(event: &'static str, value: &SingleValue, context: &ChangeContext<SingleError>) -> Self {
        Self {
            event,
            value: value.map(|d| d.to_rfc3339()),
            error: context.validation_error,
            shortcut: context.shortcut.as_ref().map(|s| s.label.clone()),
        }
    }

    fn plain(event: &'static str) -> Self {
        Self {
            event,
            value: None,
            error: None,
            shortcut: None,
        }
    }
}

type EventLog = Rc<RefCell<Vec<DemoEvent>>>;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting picker demo");

    let settings = match SettingsService::from_project_dirs() {
        Some(service) => service.get()?,
        None => Default::default(),
    };
    let adapter = settings.adapter()?;
    let shared_adapter: Rc<ChronoAdapter> = Rc::new(adapter.clone());

    let events: EventLog = Rc::default();
    let (on_change, on_accept, on_open, on_close) =
        (Rc::clone(&events), Rc::clone(&events), Rc::clone(&events), Rc::clone(&events));

    let controller = PickerValueController::builder(
        SingleValueManager,
        shared_adapter.clone(),
        DateValidator::new(shared_adapter),
    )
    .settings(&settings)?
    .default_value(None)
    .on_change(move |value, context| {
        on_change
            .borrow_mut()
            .push(DemoEvent::from_change("change", value, context))
    })
    .on_accept(move |value, context| {
        on_accept
            .borrow_mut()
            .push(DemoEvent::from_change("accept", value, context))
    })
    .on_open(move || on_open.borrow_mut().push(DemoEvent::plain("open")))
    .on_close(move || on_close.borrow_mut().push(DemoEvent::plain("close")))
    .build()?;

    let surfaces = PublicSurfaceBuilder::new(PickerHandle::new(controller));
    let script = read_script(std::env::args().nth(1))?;

    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let surface = surfaces.build()?;
        run_command(&surface, surfaces.handle(), &adapter, line)
            .with_context(|| format!("line {}: {}", index + 1, line))?;

        for event in events.borrow_mut().drain(..) {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    let draft = surfaces.handle().draft()?;
    log::info!("Final draft: {:?}", draft);
    Ok(())
}

fn read_script(path: Option<String>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path)),
        None => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read script from stdin")?;
            Ok(script)
        }
    }
}

fn parse_value(adapter: &ChronoAdapter, timezone: chrono_tz::Tz, token: &str) -> Result<SingleValue> {
    if token == "none" {
        return Ok(None);
    }
    let day = NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'", token))?;
    adapter
        .date_at_midnight(day, timezone)
        .map(Some)
        .ok_or_else(|| anyhow!("'{}' has no midnight in {}", token, timezone))
}

fn run_command(
    surface: &PickerSurface<SingleValueManager>,
    handle: &PickerHandle<SingleValueManager>,
    adapter: &ChronoAdapter,
    line: &str,
) -> Result<()> {
    let timezone = handle.with(|controller| controller.timezone())?;
    let parts: Vec<&str> = line.split_whitespace().collect();
    let value_arg = |index: usize| -> Result<SingleValue> {
        let token = parts
            .get(index)
            .ok_or_else(|| anyhow!("missing value argument"))?;
        parse_value(adapter, timezone, token)
    };

    match parts[0] {
        "field" => {
            let value = value_arg(1)?;
            let is_complete = parts.get(2) == Some(&"complete");
            let validation_error = handle.with(|controller| controller.validate(&value))?;
            surface.field.on_change.call(
                value,
                FieldChangeContext {
                    validation_error,
                    is_complete,
                },
            )?;
        }
        "view" => {
            let selection_state = match parts.get(2).copied().unwrap_or("finish") {
                "partial" => SelectionState::Partial,
                "shallow" => SelectionState::Shallow,
                "finish" => SelectionState::Finish,
                other => bail!("unknown selection state '{}'", other),
            };
            surface.view.on_change.call(value_arg(1)?, selection_state)?;
        }
        "shortcut" => {
            let importance = match parts.get(2).copied().unwrap_or("set") {
                "set" => ChangeImportance::Set,
                "accept" => ChangeImportance::Accept,
                other => bail!("unknown change importance '{}'", other),
            };
            let label = parts.get(3..).map(|words| words.join(" ")).unwrap_or_default();
            surface
                .layout
                .on_select_shortcut
                .call(value_arg(1)?, importance, PickerShortcut::new(label))?;
        }
        "accept" => {
            surface.actions.accept_value_changes()?;
        }
        "today" => {
            surface.actions.set_value_to_today()?;
        }
        "clear" => {
            surface.actions.clear_value()?;
        }
        "cancel" => {
            surface.actions.cancel_value_changes()?;
        }
        "dismiss" => {
            surface.private.dismiss_views()?;
        }
        "open" => {
            surface.actions.set_open(true)?;
        }
        "close" => {
            surface.actions.set_open(false)?;
        }
        other => bail!("unknown command '{}'", other),
    }
    Ok(())
}
