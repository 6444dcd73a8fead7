use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use stencil::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Inspect and edit element template properties of a BPMN document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the template entries of an element with their current values
    Entries(Target),
    /// Write a value through an entry and print the resulting operations and document
    Set {
        #[command(flatten)]
        target: Target,
        /// Entry id, e.g. `custom-mail-task-0`
        entry: String,
        /// New value; `true`/`false` for checkbox entries
        value: String,
    },
    /// Validate a value against an entry's constraints
    Validate {
        #[command(flatten)]
        target: Target,
        entry: String,
        value: String,
    },
}

#[derive(Args, Debug)]
struct Target {
    /// Path to the element templates JSON file
    templates_path: String,
    /// Path to the document JSON file
    document_path: String,
    /// BPMN id of the element to inspect; defaults to the document root
    #[arg(short, long)]
    element: Option<String>,
    /// Additional model schema JSON merged into the built-in BPMN schema
    #[arg(short, long)]
    schema: Option<String>,
}

struct Session {
    registry: TemplateRegistry,
    document: Document,
    ctx: EntryContext,
    element_id: ElementId,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Entries(target) => list_entries(&target),
        Command::Set {
            target,
            entry,
            value,
        } => set_value(&target, &entry, &value),
        Command::Validate {
            target,
            entry,
            value,
        } => validate_value(&target, &entry, &value),
    };

    if let Err(e) = result {
        exit_with_error(&e.to_string());
    }
}

fn open(target: &Target) -> Result<Session> {
    let registry = TemplateRegistry::from_file(&target.templates_path)?;
    let document = Document::from_file(&target.document_path, Arc::new(ElementFactory::new()))?;

    let schema = match &target.schema {
        Some(path) => ModelSchema::bpmn().merge(ModelSchema::from_file(path)?),
        None => ModelSchema::bpmn(),
    };
    let resolver = BindingResolver::builder().with_schema(schema).build();

    let element_id = match &target.element {
        Some(bpmn_id) => {
            document
                .find_by_bpmn_id(bpmn_id)
                .ok_or_else(|| format!("No element with id '{}' in the document", bpmn_id))?
                .id
        }
        None => document.root.id,
    };

    Ok(Session {
        registry,
        document,
        ctx: EntryContext::new(Arc::new(resolver)),
        element_id,
    })
}

impl Session {
    fn element(&self) -> Result<&Element> {
        Ok(self
            .document
            .find(self.element_id)
            .ok_or(DocumentError::ElementNotFound(self.element_id))?)
    }

    fn entries(&self) -> Result<Vec<PropertyEntry>> {
        let entries = entries_for_element(&self.registry, self.element()?, &self.ctx);
        if entries.is_empty() {
            return Err("No element template applies to the selected element".into());
        }
        Ok(entries)
    }

    fn entry(&self, id: &str) -> Result<PropertyEntry> {
        let mut entries = self.entries()?;
        let known = entries.iter().map(|e| e.id.as_str()).join(", ");
        let position = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| format!("Unknown entry '{}'. Available entries: {}", id, known))?;
        Ok(entries.swap_remove(position))
    }
}

fn parse_value(entry: &PropertyEntry, raw: &str) -> Value {
    match entry.widget {
        WidgetKind::Checkbox => Value::Bool(matches!(raw, "true" | "1" | "yes")),
        WidgetKind::TextField | WidgetKind::TextArea => Value::from(raw),
    }
}

fn list_entries(target: &Target) -> Result<()> {
    let session = open(target)?;
    let element = session.element()?;
    for entry in session.entries()? {
        let values = (entry.get)(element);
        let current = values.get(&entry.id).cloned().unwrap_or_default();
        println!(
            "{:<28} {:<10} {:<24} = {}",
            entry.id,
            format!("{:?}", entry.widget),
            entry.label.as_deref().unwrap_or("-"),
            current
        );
    }
    Ok(())
}

fn set_value(target: &Target, entry_id: &str, raw: &str) -> Result<()> {
    let mut session = open(target)?;
    let entry = session.entry(entry_id)?;

    let mut values = EntryValues::new();
    values.insert(entry.id.clone(), parse_value(&entry, raw));

    let operations = (entry.set)(&session.document, session.element()?, &values)?;
    println!("{}", serde_json::to_string_pretty(&operations)?);

    session.document.apply(&operations)?;
    println!("{}", serde_json::to_string_pretty(&session.document.to_json())?);
    Ok(())
}

fn validate_value(target: &Target, entry_id: &str, raw: &str) -> Result<()> {
    let session = open(target)?;
    let entry = session.entry(entry_id)?;

    let mut values = EntryValues::new();
    values.insert(entry.id.clone(), parse_value(&entry, raw));

    match (entry.validate)(session.element()?, &values) {
        Some(errors) => {
            let message = errors.values().join("; ");
            println!("invalid: {}", message);
        }
        None => println!("ok"),
    }
    Ok(())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
