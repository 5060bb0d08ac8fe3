use super::domain::LandingPage;
use crate::forms::{FieldKind, FieldSchema, FormSchema};

/// Render the shared landing template for one page with its quote form
/// outlined step by step. All copy is escaped.
pub fn render_landing_html(page: &LandingPage, form: &FormSchema) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(page.headline)));
    html.push_str(&format!(
        "<style>:root {{ --primary: {}; --accent: {}; }}</style>\n",
        page.theme.primary(),
        page.theme.accent()
    ));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "<section class=\"hero\" data-kind=\"{}\">\n<h1>{}</h1>\n<p>{}</p>\n\
         <a class=\"cta\" href=\"#quote\">Start your quote</a>\n</section>\n",
        page.kind.label(),
        escape_html(page.headline),
        escape_html(page.tagline)
    ));

    if !page.coverages.is_empty() {
        html.push_str("<section class=\"coverages\">\n<h2>Coverage Options</h2>\n<ul>\n");
        for coverage in page.coverages {
            html.push_str(&format!(
                "<li><h3>{}</h3><p>{}</p></li>\n",
                escape_html(coverage.title),
                escape_html(coverage.summary)
            ));
        }
        html.push_str("</ul>\n</section>\n");
    }

    render_form(&mut html, page, form);

    if !page.faqs.is_empty() {
        html.push_str("<section class=\"faq\">\n<h2>Frequently Asked Questions</h2>\n<dl>\n");
        for faq in page.faqs {
            html.push_str(&format!(
                "<dt>{}</dt><dd>{}</dd>\n",
                escape_html(faq.question),
                escape_html(faq.answer)
            ));
        }
        html.push_str("</dl>\n</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, page: &LandingPage, form: &FormSchema) {
    html.push_str(&format!(
        "<section id=\"quote\" class=\"quote-form\">\n<h2>{}</h2>\n\
         <form method=\"post\" action=\"{}\" data-form=\"{}\" data-source-page=\"{}\" data-steps=\"{}\">\n",
        escape_html(&form.title),
        escape_html(&form.endpoint.path()),
        form.key.slug(),
        escape_html(page.slug),
        form.step_count()
    ));

    for (index, step) in form.steps.iter().enumerate() {
        html.push_str(&format!(
            "<fieldset data-step=\"{}\">\n<legend>Step {} of {}: {}</legend>\n",
            index + 1,
            index + 1,
            form.step_count(),
            escape_html(&step.title)
        ));
        if let Some(description) = &step.description {
            html.push_str(&format!("<p>{}</p>\n", escape_html(description)));
        }
        for field in &step.fields {
            render_field(html, &form.key_style.render(&field.name), field);
        }
        for name in &step.lists {
            let Some(list) = form.list_schema(name) else {
                continue;
            };
            let list_key = form.key_style.render(&list.name);
            html.push_str(&format!(
                "<div class=\"record-list\" data-list=\"{}\">\n<h3>{} 1</h3>\n",
                escape_html(&list_key),
                escape_html(&list.item_label)
            ));
            for attribute in &list.attributes {
                let name = format!("{}[0].{}", list_key, form.key_style.render(&attribute.name));
                render_field(html, &name, attribute);
            }
            html.push_str(&format!(
                "<button type=\"button\" data-add=\"{}\">Add another {}</button>\n</div>\n",
                escape_html(&list_key),
                escape_html(&list.item_label.to_lowercase())
            ));
        }
        html.push_str("</fieldset>\n");
    }

    html.push_str("<button type=\"submit\">Submit Quote Request</button>\n</form>\n</section>\n");
}

fn render_field(html: &mut String, name: &str, field: &FieldSchema) {
    let name = escape_html(name);
    let label = escape_html(&field.label);
    let required = if field.required { " required" } else { "" };
    let marker = if field.required { " *" } else { "" };
    let value = field
        .default
        .as_deref()
        .map(|value| format!(" value=\"{}\"", escape_html(value)))
        .unwrap_or_default();

    html.push_str(&format!("<label>{label}{marker}\n"));
    match &field.kind {
        FieldKind::TextArea => {
            html.push_str(&format!("<textarea name=\"{name}\"{required}></textarea>\n"));
        }
        FieldKind::Select(options) => {
            html.push_str(&format!("<select name=\"{name}\"{required}>\n<option value=\"\">Select...</option>\n"));
            for option in options {
                let selected = if field.default.as_deref() == Some(option.as_str()) {
                    " selected"
                } else {
                    ""
                };
                let option = escape_html(option);
                html.push_str(&format!("<option value=\"{option}\"{selected}>{option}</option>\n"));
            }
            html.push_str("</select>\n");
        }
        kind => {
            html.push_str(&format!(
                "<input type=\"{}\" name=\"{name}\"{value}{required}>\n",
                input_type(kind)
            ));
        }
    }
    html.push_str("</label>\n");
}

fn input_type(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Phone => "tel",
        FieldKind::Date => "date",
        FieldKind::Number => "number",
        FieldKind::Text | FieldKind::TextArea | FieldKind::ZipCode | FieldKind::Select(_) => "text",
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{form_schema, FormKey};
    use crate::landing::find_landing_page;

    #[test]
    fn escapes_markup_in_copy() {
        assert_eq!(
            escape_html(r#"<b>"Tom's" & Co</b>"#),
            "&lt;b&gt;&quot;Tom&#39;s&quot; &amp; Co&lt;/b&gt;"
        );
    }

    #[test]
    fn renders_hero_coverages_faqs_and_form_outline() {
        let page = find_landing_page("heartland-mutual").expect("carrier page");
        let form = form_schema(page.form);
        let html = render_landing_html(page, &form);

        assert!(html.contains("<h1>Heartland Mutual Commercial Auto</h1>"));
        assert!(html.contains("--primary: #1e3a8a"));
        assert!(html.contains("<h3>Motor Truck Cargo</h3>"));
        assert!(html.contains("<dt>Can I add drivers after the policy starts?</dt>"));
        assert!(html.contains("action=\"/api/commercial-auto-quotes\""));
        assert!(html.contains("data-source-page=\"heartland-mutual\""));
        assert!(html.contains("Step 6 of 6"));
        assert!(html.contains("name=\"vehicles[0].year\""));
        assert!(html.contains("Add another vehicle"));
        assert!(html.contains("name=\"businessName\" required"));
    }

    #[test]
    fn field_names_follow_the_form_key_style() {
        let page = find_landing_page("roofers").expect("industry page");
        let html = render_landing_html(page, &form_schema(FormKey::WorkersComp));
        assert!(html.contains("name=\"business_name\""));
        assert!(html.contains("name=\"employee_classes[0].annual_payroll\""));
    }

    #[test]
    fn apostrophes_in_copy_are_escaped() {
        let page = find_landing_page("restaurants").expect("industry page");
        let html = render_landing_html(page, &form_schema(page.form));
        assert!(html.contains("Business Owner&#39;s Policy"));
        assert!(!html.contains("Business Owner's Policy"));
    }
}
