use super::domain::{ColorTheme, Coverage, Faq, LandingKind, LandingPage};
use crate::forms::FormKey;

const FLEET_COVERAGES: &[Coverage] = &[
    Coverage {
        title: "Auto Liability",
        summary: "Bodily injury and property damage you cause while operating company vehicles.",
    },
    Coverage {
        title: "Physical Damage",
        summary: "Collision and comprehensive protection for owned trucks, vans, and trailers.",
    },
    Coverage {
        title: "Motor Truck Cargo",
        summary: "Covers the freight you haul against theft, fire, and overturn.",
    },
    Coverage {
        title: "Hired & Non-Owned Auto",
        summary: "Liability when employees drive rented or personal vehicles on company business.",
    },
];

const CONTRACTOR_COVERAGES: &[Coverage] = &[
    Coverage {
        title: "General Liability",
        summary: "Third-party injury and property damage arising from your jobsites.",
    },
    Coverage {
        title: "Workers' Compensation",
        summary: "Medical bills and lost wages for crew members hurt on the job.",
    },
    Coverage {
        title: "Inland Marine",
        summary: "Tools and equipment in transit or stored at a jobsite.",
    },
];

const RESTAURANT_COVERAGES: &[Coverage] = &[
    Coverage {
        title: "Business Owner's Policy",
        summary: "Property and liability bundled at a lower premium than buying separately.",
    },
    Coverage {
        title: "Food Spoilage",
        summary: "Replaces inventory lost when refrigeration fails.",
    },
    Coverage {
        title: "Liquor Liability",
        summary: "Claims tied to serving alcohol to guests.",
    },
];

const HOME_COVERAGES: &[Coverage] = &[
    Coverage {
        title: "Dwelling",
        summary: "Repairs or rebuilds the structure of your home after a covered loss.",
    },
    Coverage {
        title: "Personal Property",
        summary: "Furniture, electronics, and clothing, at home or away.",
    },
    Coverage {
        title: "Loss of Use",
        summary: "Hotel and meal costs while your home is being repaired.",
    },
];

const GENERAL_FAQS: &[Faq] = &[
    Faq {
        question: "How long does a quote take?",
        answer: "Most quotes are back within one business day of a complete request.",
    },
    Faq {
        question: "Is there a fee to request a quote?",
        answer: "No. Quotes are free and carry no obligation to buy.",
    },
];

const FLEET_FAQS: &[Faq] = &[
    Faq {
        question: "Do I need a USDOT number to get a quote?",
        answer: "Interstate haulers do. Local fleets can leave the field blank and we will confirm filing requirements.",
    },
    Faq {
        question: "Can I add drivers after the policy starts?",
        answer: "Yes. Send the driver's license details to your agent and they are added by endorsement.",
    },
    Faq {
        question: "How long does a quote take?",
        answer: "Most quotes are back within one business day of a complete request.",
    },
];

const CONTRACTOR_FAQS: &[Faq] = &[
    Faq {
        question: "Which class codes apply to my crew?",
        answer: "Describe the work each group does and your agent will match it to the right class code.",
    },
    Faq {
        question: "Do you write policies for new contractors?",
        answer: "Yes. Businesses in their first year can still get a quote.",
    },
];

const PAGES: &[LandingPage] = &[
    LandingPage {
        slug: "heartland-mutual",
        partner: "Heartland Mutual",
        kind: LandingKind::Carrier,
        theme: ColorTheme::Navy,
        headline: "Heartland Mutual Commercial Auto",
        tagline: "Fleet coverage from a carrier that has insured Midwest haulers for decades.",
        coverages: FLEET_COVERAGES,
        faqs: FLEET_FAQS,
        form: FormKey::CommercialAuto,
    },
    LandingPage {
        slug: "summit-casualty",
        partner: "Summit Casualty",
        kind: LandingKind::Carrier,
        theme: ColorTheme::Slate,
        headline: "Summit Casualty General Liability",
        tagline: "Liability limits sized for contractors, retailers, and service firms.",
        coverages: CONTRACTOR_COVERAGES,
        faqs: GENERAL_FAQS,
        form: FormKey::GeneralLiability,
    },
    LandingPage {
        slug: "prairie-state-home",
        partner: "Prairie State Insurance",
        kind: LandingKind::Carrier,
        theme: ColorTheme::Forest,
        headline: "Homeowners Coverage from Prairie State",
        tagline: "Protect the house, the things inside it, and your time while it's repaired.",
        coverages: HOME_COVERAGES,
        faqs: GENERAL_FAQS,
        form: FormKey::Home,
    },
    LandingPage {
        slug: "trucking",
        partner: "Trucking & Logistics",
        kind: LandingKind::Industry,
        theme: ColorTheme::Navy,
        headline: "Insurance for Trucking Companies",
        tagline: "Owner-operators to regional fleets: one application, several carriers.",
        coverages: FLEET_COVERAGES,
        faqs: FLEET_FAQS,
        form: FormKey::CommercialAuto,
    },
    LandingPage {
        slug: "roofers",
        partner: "Roofing Contractors",
        kind: LandingKind::Industry,
        theme: ColorTheme::Amber,
        headline: "Workers' Comp for Roofing Contractors",
        tagline: "Payroll-based pricing with carriers that understand high-exposure trades.",
        coverages: CONTRACTOR_COVERAGES,
        faqs: CONTRACTOR_FAQS,
        form: FormKey::WorkersComp,
    },
    LandingPage {
        slug: "restaurants",
        partner: "Restaurants & Cafés",
        kind: LandingKind::Industry,
        theme: ColorTheme::Crimson,
        headline: "Restaurant Insurance",
        tagline: "Kitchen fires, slip-and-falls, and spoiled inventory, covered in one policy.",
        coverages: RESTAURANT_COVERAGES,
        faqs: GENERAL_FAQS,
        form: FormKey::BusinessOwners,
    },
    LandingPage {
        slug: "quick-quote",
        partner: "Quick Quote",
        kind: LandingKind::Product,
        theme: ColorTheme::Slate,
        headline: "Get a Quote in Under a Minute",
        tagline: "Tell us the basics and an agent will call with options.",
        coverages: &[],
        faqs: GENERAL_FAQS,
        form: FormKey::QuickQuote,
    },
    LandingPage {
        slug: "request-a-quote",
        partner: "Request a Quote",
        kind: LandingKind::Product,
        theme: ColorTheme::Forest,
        headline: "Not Sure What You Need?",
        tagline: "Describe your business and we'll recommend the right coverage.",
        coverages: &[],
        faqs: GENERAL_FAQS,
        form: FormKey::QuoteRequest,
    },
];

/// The data table behind every `/landing/{slug}` page.
pub fn landing_pages() -> &'static [LandingPage] {
    PAGES
}

pub fn find_landing_page(slug: &str) -> Option<&'static LandingPage> {
    let slug = slug.trim().to_ascii_lowercase();
    PAGES.iter().find(|page| page.slug == slug)
}
