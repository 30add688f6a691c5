use clap::Args;
use survey_quote::error::AppError;
use survey_quote::quoting::{
    calculate_quote, describe_outcode, estimate_distance_from_outcode, match_outcodes,
    parse_bedrooms, parse_property_value, pricing::format_currency, QuoteBreakdown, QuoteInput,
};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Survey type id (level1, level2, level3, damp, ventilation, epc, measured, unsure)
    #[arg(long)]
    pub(crate) survey: String,
    /// Estimated property value, e.g. 250000 or "£250,000"
    #[arg(long, default_value = "250000")]
    pub(crate) value: String,
    /// Bedroom count
    #[arg(long, default_value = "3")]
    pub(crate) bedrooms: String,
    /// Property postcode or outcode, used to derive the travel band
    #[arg(long)]
    pub(crate) postcode: Option<String>,
    /// Travel band id, overriding any postcode-derived distance
    #[arg(long)]
    pub(crate) band: Option<String>,
    /// Construction complexity id (standard, extended, period)
    #[arg(long)]
    pub(crate) complexity: Option<String>,
    /// Property type id, e.g. detached-house
    #[arg(long)]
    pub(crate) property_type: Option<String>,
    /// Property age id, e.g. pre-1900
    #[arg(long)]
    pub(crate) property_age: Option<String>,
    /// Extension status id (none, extended, converted, extended-and-converted)
    #[arg(long)]
    pub(crate) extension: Option<String>,
    /// Add-on service ids; repeat the flag for several
    #[arg(long = "extra")]
    pub(crate) extras: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct OutcodesArgs {
    /// Free-text query; omit to list the outcodes nearest the office
    pub(crate) query: Option<String>,
    /// Maximum number of results
    #[arg(long, default_value_t = 6)]
    pub(crate) limit: usize,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let distance_miles = if args.band.is_none() {
        args.postcode
            .as_deref()
            .and_then(estimate_distance_from_outcode)
    } else {
        None
    };

    let input = QuoteInput {
        survey_type: args.survey,
        property_value: parse_property_value(&args.value),
        bedrooms: parse_bedrooms(&args.bedrooms),
        complexity: args.complexity,
        property_type: args.property_type,
        property_age: args.property_age,
        extension_status: args.extension,
        distance_band_id: args.band,
        distance_miles,
        extras: args.extras,
    };

    let breakdown = calculate_quote(&input)?;
    render_breakdown(&breakdown, args.postcode.as_deref(), distance_miles);
    Ok(())
}

fn render_breakdown(breakdown: &QuoteBreakdown, postcode: Option<&str>, miles: Option<f64>) {
    println!("{}", breakdown.survey.label);
    println!("  Base fee: {}", format_currency(breakdown.base.gross));

    if !breakdown.value_adjustment.is_zero() {
        println!(
            "  Property value scaling: {}",
            format_currency(breakdown.value_adjustment.gross)
        );
    }
    for adjustment in &breakdown.adjustments {
        println!(
            "  {}: {}",
            adjustment.label,
            format_currency(adjustment.amount.gross)
        );
    }
    for extra in &breakdown.applied_extras {
        println!("  {}: {}", extra.label, format_currency(extra.amount.gross));
    }

    match (postcode, miles) {
        (Some(postcode), Some(miles)) => println!(
            "  Travel band: {} ({postcode}, approx {miles:.1} miles)",
            breakdown.distance_band.label
        ),
        _ => println!("  Travel band: {}", breakdown.distance_band.label),
    }

    println!(
        "  Total: {} inc. VAT (net £{:.2}, VAT £{:.2})",
        format_currency(breakdown.total.gross),
        breakdown.total.net,
        breakdown.total.vat
    );
    println!(
        "  Guide range: {} – {}",
        format_currency(breakdown.range.min),
        format_currency(breakdown.range.max)
    );
}

pub(crate) fn run_outcodes(args: OutcodesArgs) -> Result<(), AppError> {
    let query = args.query.unwrap_or_default();
    let results = match_outcodes(&query, args.limit);

    if results.is_empty() {
        println!("No outcodes matched {query:?}.");
        return Ok(());
    }

    for result in results {
        let summary = describe_outcode(result.record.outcode)
            .unwrap_or_else(|| result.record.label.to_string());
        println!(
            "{:<5} {:>6.1} miles  {}",
            result.record.outcode, result.distance_miles, summary
        );
    }
    Ok(())
}
