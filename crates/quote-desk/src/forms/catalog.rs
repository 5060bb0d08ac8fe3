use super::schema::{
    FieldKind, FieldSchema, FormKey, FormSchema, KeyStyle, ListSchema, QuoteEndpoint, StepSchema,
};
use super::validation::ValidationPolicy;

const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

/// Every quote form the site embeds.
pub fn form_catalog() -> Vec<FormSchema> {
    FormKey::ALL.into_iter().map(form_schema).collect()
}

pub fn form_schema(key: FormKey) -> FormSchema {
    match key {
        FormKey::CommercialAuto => commercial_auto(),
        FormKey::GeneralLiability => general_liability(),
        FormKey::WorkersComp => workers_comp(),
        FormKey::BusinessOwners => business_owners(),
        FormKey::Home => home(),
        FormKey::QuoteRequest => quote_request(),
        FormKey::QuickQuote => quick_quote(),
    }
}

/// Resolve the form behind an `/api/{segment}` path.
pub fn form_for_segment(segment: &str) -> Option<FormSchema> {
    let endpoint = QuoteEndpoint::from_segment(segment)?;
    form_catalog()
        .into_iter()
        .find(|schema| schema.endpoint == endpoint)
}

fn email() -> FieldSchema {
    FieldSchema::new("email", "Email", FieldKind::Email)
}

fn phone() -> FieldSchema {
    FieldSchema::new("phone", "Phone", FieldKind::Phone)
}

fn zip_code() -> FieldSchema {
    FieldSchema::new("zip_code", "ZIP Code", FieldKind::ZipCode)
}

fn state_select(name: &str, label: &str) -> FieldSchema {
    FieldSchema::select(name, label, US_STATES)
}

fn business_profile() -> StepSchema {
    StepSchema::new("Business Information")
        .field(FieldSchema::text("business_name", "Legal Business Name").required())
        .field(FieldSchema::text("dba_name", "DBA"))
        .field(
            FieldSchema::select(
                "business_type",
                "Entity Type",
                &["LLC", "Corporation", "Sole Proprietor", "Partnership", "Non-Profit"],
            )
            .required(),
        )
        .field(FieldSchema::new("years_in_business", "Years in Business", FieldKind::Number).required())
        .field(FieldSchema::text("federal_ein", "Federal EIN"))
}

fn contact_step(title: &str) -> StepSchema {
    StepSchema::new(title)
        .field(FieldSchema::text("contact_name", "Contact Name").required())
        .field(email().required())
        .field(phone().required())
        .field(FieldSchema::text("street_address", "Street Address"))
        .field(FieldSchema::text("city", "City"))
        .field(state_select("state", "State"))
        .field(zip_code())
}

fn commercial_auto() -> FormSchema {
    FormSchema::new(FormKey::CommercialAuto, QuoteEndpoint::topic("commercial-auto"))
        .titled("Commercial Auto Quote")
        .key_style(KeyStyle::CamelCase)
        .validation(ValidationPolicy::RequiredFields)
        .step(
            business_profile()
                .describe("Tell us about the business that owns or operates the vehicles.")
                .field(FieldSchema::text("usdot_number", "USDOT Number"))
                .field(FieldSchema::text("mc_number", "MC Number")),
        )
        .step(contact_step("Contact Details"))
        .step(
            StepSchema::new("Vehicles")
                .describe("Add every vehicle you want on the policy.")
                .list("vehicles"),
        )
        .step(
            StepSchema::new("Drivers")
                .describe("List everyone who drives for the business.")
                .list("drivers"),
        )
        .step(
            StepSchema::new("Coverage")
                .field(
                    FieldSchema::select(
                        "liability_limit",
                        "Liability Limit",
                        &["$500,000 CSL", "$1,000,000 CSL", "$2,000,000 CSL"],
                    )
                    .required(),
                )
                .field(FieldSchema::select(
                    "physical_damage",
                    "Physical Damage",
                    &["Comprehensive & Collision", "Comprehensive Only", "None"],
                ))
                .field(FieldSchema::select(
                    "hired_non_owned",
                    "Hired & Non-Owned Auto",
                    &["Yes", "No"],
                ))
                .field(FieldSchema::select(
                    "cargo_coverage",
                    "Motor Truck Cargo",
                    &["None", "$50,000", "$100,000", "$250,000"],
                ))
                .field(FieldSchema::text("current_carrier", "Current Carrier"))
                .field(FieldSchema::new(
                    "policy_expiration",
                    "Current Policy Expiration",
                    FieldKind::Date,
                )),
        )
        .step(
            StepSchema::new("Review & Submit")
                .field(FieldSchema::new("effective_date", "Desired Effective Date", FieldKind::Date).required())
                .field(FieldSchema::new(
                    "additional_notes",
                    "Anything else we should know?",
                    FieldKind::TextArea,
                )),
        )
        .list(ListSchema::new(
            "vehicles",
            "Vehicle",
            vec![
                FieldSchema::new("year", "Year", FieldKind::Number).required(),
                FieldSchema::text("make", "Make").required(),
                FieldSchema::text("model", "Model").required(),
                FieldSchema::text("vin", "VIN"),
                FieldSchema::select(
                    "vehicle_type",
                    "Vehicle Type",
                    &["Pickup", "Cargo Van", "Box Truck", "Tractor", "Trailer", "Passenger Van"],
                ),
                FieldSchema::new("garaging_zip", "Garaging ZIP", FieldKind::ZipCode),
                FieldSchema::new("stated_value", "Stated Value", FieldKind::Number),
            ],
        ))
        .list(ListSchema::new(
            "drivers",
            "Driver",
            vec![
                FieldSchema::text("first_name", "First Name").required(),
                FieldSchema::text("last_name", "Last Name").required(),
                FieldSchema::new("date_of_birth", "Date of Birth", FieldKind::Date).required(),
                FieldSchema::text("license_number", "License Number").required(),
                state_select("license_state", "License State").required(),
                FieldSchema::new("years_licensed", "Years Licensed", FieldKind::Number),
                FieldSchema::text("violations", "Violations (last 3 years)"),
            ],
        ))
}

fn general_liability() -> FormSchema {
    FormSchema::new(FormKey::GeneralLiability, QuoteEndpoint::topic("general-liability"))
        .titled("General Liability Quote")
        .validation(ValidationPolicy::Schema)
        .step(business_profile())
        .step(
            StepSchema::new("Operations")
                .field(
                    FieldSchema::select(
                        "industry",
                        "Industry",
                        &["Contractor", "Retail", "Restaurant", "Professional Services", "Manufacturing", "Other"],
                    )
                    .required(),
                )
                .field(FieldSchema::new("annual_revenue", "Annual Revenue", FieldKind::Number).required())
                .field(FieldSchema::new("employee_count", "Employees", FieldKind::Number).required())
                .field(FieldSchema::new(
                    "operations_description",
                    "Describe your operations",
                    FieldKind::TextArea,
                ))
                .list("locations"),
        )
        .step(
            StepSchema::new("Coverage")
                .field(
                    FieldSchema::select(
                        "occurrence_limit",
                        "Per-Occurrence Limit",
                        &["$1,000,000", "$2,000,000"],
                    )
                    .required(),
                )
                .field(FieldSchema::select(
                    "aggregate_limit",
                    "Aggregate Limit",
                    &["$2,000,000", "$4,000,000"],
                ))
                .field(FieldSchema::new("effective_date", "Desired Effective Date", FieldKind::Date)),
        )
        .step(contact_step("Contact Details"))
        .list(ListSchema::new(
            "locations",
            "Location",
            vec![
                FieldSchema::text("street_address", "Street Address").required(),
                FieldSchema::text("city", "City").required(),
                state_select("state", "State").required(),
                zip_code().required(),
                FieldSchema::new("square_feet", "Square Feet", FieldKind::Number),
            ],
        ))
}

fn workers_comp() -> FormSchema {
    FormSchema::new(FormKey::WorkersComp, QuoteEndpoint::topic("workers-comp"))
        .titled("Workers' Compensation Quote")
        .validation(ValidationPolicy::RequiredFields)
        .step(business_profile())
        .step(
            StepSchema::new("Payroll")
                .describe("Break payroll down by class of work.")
                .list("employee_classes"),
        )
        .step(
            StepSchema::new("Loss History")
                .field(FieldSchema::new("claims_last_three_years", "Claims (last 3 years)", FieldKind::Number))
                .field(FieldSchema::text("experience_mod", "Experience Mod"))
                .field(FieldSchema::text("current_carrier", "Current Carrier")),
        )
        .step(contact_step("Contact Details"))
        .list(ListSchema::new(
            "employee_classes",
            "Class",
            vec![
                FieldSchema::text("class_code", "Class Code"),
                FieldSchema::text("description", "Job Description").required(),
                FieldSchema::new("employee_count", "Employees", FieldKind::Number).required(),
                FieldSchema::new("annual_payroll", "Annual Payroll", FieldKind::Number).required(),
            ],
        ))
}

fn business_owners() -> FormSchema {
    FormSchema::new(FormKey::BusinessOwners, QuoteEndpoint::topic("business-owners"))
        .titled("Business Owner's Policy Quote")
        .key_style(KeyStyle::CamelCase)
        .validation(ValidationPolicy::Cosmetic)
        .step(
            StepSchema::new("Business")
                .field(FieldSchema::text("business_name", "Business Name").required())
                .field(FieldSchema::select(
                    "industry",
                    "Industry",
                    &["Retail", "Restaurant", "Office", "Salon", "Other"],
                ))
                .field(FieldSchema::new("annual_revenue", "Annual Revenue", FieldKind::Number)),
        )
        .step(
            StepSchema::new("Property")
                .field(FieldSchema::select("owns_building", "Do you own the building?", &["Yes", "No"]))
                .field(FieldSchema::new("building_value", "Building Value", FieldKind::Number))
                .field(FieldSchema::new("contents_value", "Business Personal Property", FieldKind::Number))
                .field(FieldSchema::new("year_built", "Year Built", FieldKind::Number)),
        )
        .step(contact_step("Contact Details"))
}

fn home() -> FormSchema {
    FormSchema::new(FormKey::Home, QuoteEndpoint::topic("home"))
        .titled("Homeowners Quote")
        .key_style(KeyStyle::CamelCase)
        .validation(ValidationPolicy::Schema)
        .gated()
        .step(
            StepSchema::new("Property")
                .field(FieldSchema::text("street_address", "Property Address").required())
                .field(FieldSchema::text("city", "City").required())
                .field(state_select("state", "State").required())
                .field(zip_code().required())
                .field(
                    FieldSchema::select(
                        "dwelling_type",
                        "Dwelling Type",
                        &["Single Family", "Townhome", "Condo", "Mobile Home"],
                    )
                    .required(),
                )
                .field(FieldSchema::new("year_built", "Year Built", FieldKind::Number))
                .field(FieldSchema::new("square_feet", "Square Feet", FieldKind::Number)),
        )
        .step(
            StepSchema::new("Coverage")
                .field(FieldSchema::new("dwelling_coverage", "Dwelling Coverage", FieldKind::Number))
                .field(
                    FieldSchema::select("deductible", "Deductible", &["$500", "$1,000", "$2,500", "1%", "2%"])
                        .with_default("$1,000"),
                )
                .field(FieldSchema::select("has_pool", "Pool on property?", &["Yes", "No"]))
                .field(FieldSchema::new("effective_date", "Desired Effective Date", FieldKind::Date)),
        )
        .step(
            StepSchema::new("About You")
                .field(FieldSchema::text("first_name", "First Name").required())
                .field(FieldSchema::text("last_name", "Last Name").required())
                .field(FieldSchema::new("date_of_birth", "Date of Birth", FieldKind::Date))
                .field(email().required())
                .field(phone().required()),
        )
}

fn quote_request() -> FormSchema {
    FormSchema::new(FormKey::QuoteRequest, QuoteEndpoint::QuoteRequests)
        .titled("Request a Quote")
        .validation(ValidationPolicy::Cosmetic)
        .step(
            StepSchema::new("What do you need?")
                .field(
                    FieldSchema::select(
                        "coverage_interest",
                        "Coverage",
                        &[
                            "Commercial Auto",
                            "General Liability",
                            "Workers' Compensation",
                            "Business Owner's Policy",
                            "Homeowners",
                            "Other",
                        ],
                    )
                    .required(),
                )
                .field(FieldSchema::text("business_name", "Business Name"))
                .field(FieldSchema::new("message", "How can we help?", FieldKind::TextArea)),
        )
        .step(
            StepSchema::new("Contact")
                .field(FieldSchema::text("full_name", "Full Name").required())
                .field(email().required())
                .field(phone())
                .field(FieldSchema::select(
                    "preferred_contact",
                    "Preferred Contact Method",
                    &["Email", "Phone", "Text"],
                )),
        )
}

fn quick_quote() -> FormSchema {
    FormSchema::new(FormKey::QuickQuote, QuoteEndpoint::QuickQuotes)
        .titled("Quick Quote")
        .key_style(KeyStyle::CamelCase)
        .validation(ValidationPolicy::Schema)
        .step(
            StepSchema::new("Get a Quick Quote")
                .field(FieldSchema::text("full_name", "Full Name").required())
                .field(email().required())
                .field(phone().required())
                .field(
                    FieldSchema::select(
                        "insurance_type",
                        "Insurance Type",
                        &["Commercial Auto", "General Liability", "Workers' Compensation", "Home", "Other"],
                    )
                    .required(),
                )
                .field(zip_code()),
        )
}
