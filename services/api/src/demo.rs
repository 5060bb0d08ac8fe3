use crate::infra::{
    parse_field_assignment, parse_item_assignment, InMemoryAgentNotifier, InMemoryQuoteRepository,
    ItemAssignment,
};
use chrono::Local;
use clap::Args;
use quote_desk::config::{AppConfig, IntakeConfig};
use quote_desk::error::AppError;
use quote_desk::forms::{
    form_catalog, form_schema, FieldKind, FieldSchema, FormKey, QuoteWizard, RecordList,
    SubmitOutcome, WizardError,
};
use quote_desk::intake::{InProcessTransport, QuoteRequestService, QuoteRequestStatus};
use quote_desk::landing::{find_landing_page, landing_pages, render_landing_html};
use quote_desk::submission::{HttpSubmissionClient, SubmissionTransport};
use std::path::PathBuf;
use std::sync::Arc;

type LocalService = QuoteRequestService<InMemoryQuoteRepository, InMemoryAgentNotifier>;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Form key, e.g. quick-quote or commercial-auto
    #[arg(long)]
    pub(crate) form: String,
    /// Field value as NAME=VALUE (repeatable)
    #[arg(long = "field", value_parser = parse_field_assignment)]
    pub(crate) fields: Vec<(String, String)>,
    /// Collection value as LIST.ATTRIBUTE=VALUE or LIST[INDEX].ATTRIBUTE=VALUE (repeatable)
    #[arg(long = "item", value_parser = parse_item_assignment)]
    pub(crate) items: Vec<ItemAssignment>,
    /// Landing page the submission is attributed to
    #[arg(long)]
    pub(crate) source_page: Option<String>,
    /// Post to the quote API at QUOTE_API_URL instead of an in-process backend
    #[arg(long)]
    pub(crate) remote: bool,
    /// Post to this quote API base URL (implies --remote)
    #[arg(long)]
    pub(crate) api_url: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the agent desk CSV export at the end of the demo.
    #[arg(long)]
    pub(crate) skip_export: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LandingRenderArgs {
    /// Landing page slug, e.g. trucking
    pub(crate) slug: String,
    /// Write the HTML to this file instead of stdout
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn list_forms() {
    println!("Quote forms");
    for schema in form_catalog() {
        println!(
            "- {:<18} {:<32} {} steps -> POST {}",
            schema.key.slug(),
            schema.title,
            schema.step_count(),
            schema.endpoint.path()
        );
    }
}

pub(crate) fn show_form(raw: &str) -> Result<(), AppError> {
    let key = FormKey::from_slug(raw).ok_or_else(|| AppError::UnknownForm(raw.to_string()))?;
    let schema = form_schema(key);

    println!("{} ({})", schema.title, schema.key.slug());
    println!(
        "Endpoint: POST {} | validation: {:?} | keys: {:?}{}",
        schema.endpoint.path(),
        schema.validation,
        schema.key_style,
        if schema.gate_steps {
            " | steps gated"
        } else {
            ""
        }
    );

    for (index, step) in schema.steps.iter().enumerate() {
        println!("\nStep {} of {}: {}", index + 1, schema.step_count(), step.title);
        if let Some(description) = &step.description {
            println!("  {description}");
        }
        for field in &step.fields {
            println!("  - {}", describe_field(field));
        }
        for name in &step.lists {
            let Some(list) = schema.list_schema(name) else {
                continue;
            };
            println!("  [{}] one or more {} records:", list.name, list.item_label);
            for attribute in &list.attributes {
                println!("    - {}", describe_field(attribute));
            }
        }
    }

    Ok(())
}

pub(crate) fn list_landing_pages() {
    println!("Landing pages");
    for page in landing_pages() {
        println!(
            "- {:<20} {:<26} {:<9} form={} -> {}",
            page.slug,
            page.partner,
            page.kind.label(),
            page.form.slug(),
            page.path()
        );
    }
}

pub(crate) fn render_landing_page(args: LandingRenderArgs) -> Result<(), AppError> {
    let page = find_landing_page(&args.slug)
        .ok_or_else(|| AppError::UnknownLandingPage(args.slug.clone()))?;
    let html = render_landing_html(page, &form_schema(page.form));

    match args.out {
        Some(path) => {
            std::fs::write(&path, html)?;
            println!("Wrote {} to {}", page.path(), path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let SubmitArgs {
        form,
        fields,
        items,
        source_page,
        remote,
        api_url,
    } = args;

    let key = FormKey::from_slug(&form).ok_or_else(|| AppError::UnknownForm(form.clone()))?;
    let mut wizard = QuoteWizard::new(form_schema(key));
    if let Some(page) = source_page {
        wizard = wizard.with_source_page(page);
    }
    fill_wizard(&mut wizard, &fields, &items)?;

    let config = AppConfig::load()?;
    if remote || api_url.is_some() {
        let mut client_config = config.client;
        if let Some(url) = api_url {
            client_config.base_url = url;
        }
        let client = HttpSubmissionClient::from_config(&client_config)?;
        println!("Submitting {} to {}", key.slug(), client.base_url());
        submit_and_report(&mut wizard, &client).await?;
    } else {
        let (service, _, _) = local_backend(config.intake);
        let transport = InProcessTransport::new(service);
        println!("Submitting {} to an in-process backend", key.slug());
        submit_and_report(&mut wizard, &transport).await?;
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (service, _, notifier) = local_backend(IntakeConfig::default());
    let transport = InProcessTransport::new(service.clone());

    println!("Quote desk demo ({})", Local::now().format("%Y-%m-%d %H:%M"));

    println!("\nCommercial auto wizard from /landing/heartland-mutual");
    let mut auto = demo_commercial_auto()?;
    let auto_reference = submit_and_report(&mut auto, &transport).await?;

    println!("\nQuick quote from /landing/quick-quote");
    let mut quick = QuoteWizard::new(form_schema(FormKey::QuickQuote)).with_source_page("quick-quote");
    fill_wizard(
        &mut quick,
        &[
            ("full_name".to_string(), "Marisol Vega".to_string()),
            ("email".to_string(), "marisol.vega@example.com".to_string()),
            ("phone".to_string(), "319-555-0143".to_string()),
            ("insurance_type".to_string(), "General Liability".to_string()),
        ],
        &[],
    )?;
    let quick_reference = submit_and_report(&mut quick, &transport).await?;

    println!("\nQuick quote with a typo in the email");
    let mut typo = QuoteWizard::new(form_schema(FormKey::QuickQuote));
    typo.update_field("full_name", "Dev Patel");
    typo.update_field("email", "dev.patel@example");
    typo.update_field("phone", "319-555-0107");
    typo.update_field("insurance_type", "Home");
    match typo.submit(&transport).await {
        Err(WizardError::Invalid(issues)) => {
            println!("  Refused before sending:");
            for issue in issues {
                println!("    - {}: {}", issue.field, issue.message);
            }
        }
        Err(err) => println!("  Refused before sending: {err}"),
        Ok(_) => println!("  Unexpectedly accepted"),
    }

    println!("\nAgent desk");
    for (reference, status) in [
        (&auto_reference, QuoteRequestStatus::Assigned),
        (&auto_reference, QuoteRequestStatus::Quoted),
        (&quick_reference, QuoteRequestStatus::Assigned),
    ] {
        let Some(reference) = reference else {
            continue;
        };
        match service.update_status(reference, status) {
            Ok(record) => {
                let view = record.status_view();
                println!(
                    "- {} ({}) -> {}",
                    view.reference_number, view.contact_name, view.status
                );
            }
            Err(err) => println!("- {reference}: {err}"),
        }
    }

    let events = notifier.events();
    println!("Notifications sent: {}", events.len());
    for event in &events {
        println!("  - {} {} ({})", event.template, event.reference, event.form);
    }

    if !args.skip_export {
        println!("\nCSV export");
        print!("{}", service.export(quote_desk::intake::EXPORT_LIMIT)?);
    }

    Ok(())
}

fn local_backend(
    config: IntakeConfig,
) -> (
    Arc<LocalService>,
    InMemoryQuoteRepository,
    InMemoryAgentNotifier,
) {
    let repository = InMemoryQuoteRepository::default();
    let notifier = InMemoryAgentNotifier::default();
    let service = Arc::new(QuoteRequestService::new(
        Arc::new(repository.clone()),
        Arc::new(notifier.clone()),
        config,
    ));
    (service, repository, notifier)
}

fn fill_wizard(
    wizard: &mut QuoteWizard,
    fields: &[(String, String)],
    items: &[ItemAssignment],
) -> Result<(), AppError> {
    for (name, value) in fields {
        wizard.update_field(name.clone(), value.clone());
    }

    for item in items {
        loop {
            let len = wizard
                .state()
                .list(&item.list)
                .map(RecordList::len)
                .unwrap_or(0);
            if len > item.index {
                break;
            }
            wizard.add_list_item(&item.list)?;
        }
        wizard.update_list_field(&item.list, item.index, &item.attribute, item.value.clone())?;
    }

    while !wizard.is_final_step() {
        let before = wizard.current_step();
        if let Err(err) = wizard.advance() {
            print_issues(&err);
            return Err(err.into());
        }
        if wizard.current_step() == before {
            break;
        }
    }
    Ok(())
}

async fn submit_and_report<T>(
    wizard: &mut QuoteWizard,
    transport: &T,
) -> Result<Option<quote_desk::submission::QuoteReference>, AppError>
where
    T: SubmissionTransport,
{
    let progress = wizard.progress();
    println!(
        "  {} | step {} of {} ({}%)",
        wizard.schema().title,
        progress.current,
        progress.total,
        progress.percent
    );

    let outcome = match wizard.submit(transport).await {
        Ok(outcome) => outcome,
        Err(err) => {
            print_issues(&err);
            return Err(err.into());
        }
    };

    match outcome {
        SubmitOutcome::Submitted(reference) => {
            if let Some(confirmation) = wizard.confirmation() {
                println!("  {}", confirmation.headline);
                println!("  {}", confirmation.message);
            }
            Ok(reference)
        }
        SubmitOutcome::Failed(err) => {
            if let Some(notice) = wizard.notice() {
                println!("  {}", notice.message);
            }
            Err(err.into())
        }
    }
}

fn demo_commercial_auto() -> Result<QuoteWizard, AppError> {
    let mut wizard =
        QuoteWizard::new(form_schema(FormKey::CommercialAuto)).with_source_page("heartland-mutual");
    for (name, value) in [
        ("business_name", "Lone Star Hauling LLC"),
        ("business_type", "LLC"),
        ("years_in_business", "7"),
        ("usdot_number", "3141592"),
        ("contact_name", "Rosa Delgado"),
        ("email", "rosa@lonestarhauling.example"),
        ("phone", "512-555-0147"),
        ("zip_code", "78741"),
        ("liability_limit", "$1,000,000 CSL"),
        ("cargo_coverage", "$100,000"),
        ("effective_date", "2026-11-01"),
    ] {
        wizard.update_field(name, value);
    }

    let vehicles = [("2021", "Ford", "F-250"), ("2019", "Isuzu", "NPR")];
    for (index, (year, make, model)) in vehicles.into_iter().enumerate() {
        if index > 0 {
            wizard.add_list_item("vehicles")?;
        }
        for (attribute, value) in [("year", year), ("make", make), ("model", model)] {
            wizard.update_list_field("vehicles", index, attribute, value)?;
        }
    }
    for (attribute, value) in [
        ("first_name", "Rosa"),
        ("last_name", "Delgado"),
        ("date_of_birth", "1984-03-02"),
        ("license_number", "TX0042117"),
        ("license_state", "TX"),
    ] {
        wizard.update_list_field("drivers", 0, attribute, value)?;
    }

    while !wizard.is_final_step() {
        let progress = wizard.progress();
        println!("  step {}/{}: {}", progress.current, progress.total, progress.title);
        wizard.advance()?;
    }
    Ok(wizard)
}

fn describe_field(field: &FieldSchema) -> String {
    let kind = match &field.kind {
        FieldKind::Text => "text".to_string(),
        FieldKind::TextArea => "long text".to_string(),
        FieldKind::Email => "email".to_string(),
        FieldKind::Phone => "phone".to_string(),
        FieldKind::Date => "date".to_string(),
        FieldKind::Number => "number".to_string(),
        FieldKind::ZipCode => "zip".to_string(),
        FieldKind::Select(options) if options.len() > 6 => {
            format!("one of {} options", options.len())
        }
        FieldKind::Select(options) => format!("one of: {}", options.join(", ")),
    };

    let mut line = format!("{} ({}, {})", field.label, field.name, kind);
    if field.required {
        line.push_str(" *");
    }
    if let Some(default) = &field.default {
        line.push_str(&format!(" [default {default}]"));
    }
    line
}

fn print_issues(err: &WizardError) {
    let issues = match err {
        WizardError::Invalid(issues) => issues,
        WizardError::StepIncomplete { issues, .. } => issues,
        other => {
            eprintln!("  {other}");
            return;
        }
    };
    eprintln!("  Fields needing attention:");
    for issue in issues {
        eprintln!("    - {}: {}", issue.field, issue.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_quote_args(email: &str) -> SubmitArgs {
        SubmitArgs {
            form: "quick-quote".to_string(),
            fields: vec![
                ("full_name".to_string(), "Marisol Vega".to_string()),
                ("email".to_string(), email.to_string()),
                ("phone".to_string(), "319-555-0143".to_string()),
                ("insurance_type".to_string(), "General Liability".to_string()),
            ],
            items: Vec::new(),
            source_page: Some("quick-quote".to_string()),
            remote: false,
            api_url: None,
        }
    }

    #[tokio::test]
    async fn submit_command_delivers_to_the_in_process_backend() {
        run_submit(quick_quote_args("marisol.vega@example.com"))
            .await
            .expect("quick quote accepted");
    }

    #[tokio::test]
    async fn submit_command_reports_rejected_fields() {
        let result = run_submit(quick_quote_args("marisol.vega@example")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn submit_command_rejects_unknown_forms() {
        let mut args = quick_quote_args("marisol.vega@example.com");
        args.form = "boat-insurance".to_string();
        assert!(matches!(
            run_submit(args).await,
            Err(AppError::UnknownForm(form)) if form == "boat-insurance"
        ));
    }
}
