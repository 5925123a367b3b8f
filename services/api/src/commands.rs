use crate::infra::{build_lookup, format_money, print_json};
use clap::Args;
use deal_analyst::analysis::{analyze_deal, DealAnalysis, DealAnalysisRequest, DEFAULT_ADDRESS};
use deal_analyst::comps::{CompsResult, DEFAULT_MAX_RESULTS};
use deal_analyst::config::AppConfig;
use deal_analyst::error::AppError;
use deal_analyst::finance::{
    mortgage_summary, rent_vs_price, MortgageResult, MortgageTerms, RentValuationResult,
    DEFAULT_EXPENSE_RATIO, DEFAULT_TARGET_CAP_RATE,
};
use deal_analyst::telemetry;

#[derive(Args, Debug)]
pub(crate) struct CompsArgs {
    /// Address text to match (at least 3 characters)
    pub(crate) keyword: String,
    /// Number of comps to return (1-10, defaults to 3)
    #[arg(long)]
    pub(crate) max_results: Option<i64>,
    /// Preferred source: auto, attom, estated or demo
    #[arg(long, default_value = "auto")]
    pub(crate) source: String,
    /// Print the raw result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MortgageArgs {
    /// Purchase price
    #[arg(long)]
    pub(crate) price: f64,
    /// Cash down payment
    #[arg(long)]
    pub(crate) down_payment: f64,
    /// Annual interest rate in percent
    #[arg(long)]
    pub(crate) rate: f64,
    /// Loan term in years
    #[arg(long)]
    pub(crate) years: i32,
    /// Monthly property taxes
    #[arg(long, default_value_t = 0.0)]
    pub(crate) taxes: f64,
    /// Monthly insurance
    #[arg(long, default_value_t = 0.0)]
    pub(crate) insurance: f64,
    /// Monthly HOA dues
    #[arg(long, default_value_t = 0.0)]
    pub(crate) hoa: f64,
    /// Expected monthly rent
    #[arg(long, default_value_t = 0.0)]
    pub(crate) rent: f64,
    /// Print the raw result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RentValuationArgs {
    /// Monthly rent
    #[arg(long)]
    pub(crate) rent: f64,
    /// Target cap rate in percent
    #[arg(long, default_value_t = DEFAULT_TARGET_CAP_RATE)]
    pub(crate) cap_rate: f64,
    /// Share of rent consumed by operating expenses (0-1)
    #[arg(long, default_value_t = DEFAULT_EXPENSE_RATIO)]
    pub(crate) expense_ratio: f64,
    /// Print the raw result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Address to analyze (include ZIP)
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    pub(crate) address: String,
    /// Price assumption
    #[arg(long, default_value_t = 350_000.0)]
    pub(crate) price: f64,
    /// Price used for financing when comps carry no price (defaults to --price)
    #[arg(long)]
    pub(crate) fallback_price: Option<f64>,
    /// Cash down payment (defaults to 20% of price)
    #[arg(long)]
    pub(crate) down_payment: Option<f64>,
    #[arg(long, default_value_t = 6.5)]
    pub(crate) rate: f64,
    #[arg(long, default_value_t = 30)]
    pub(crate) years: i32,
    #[arg(long, default_value_t = 350.0)]
    pub(crate) taxes: f64,
    #[arg(long, default_value_t = 120.0)]
    pub(crate) insurance: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) hoa: f64,
    #[arg(long, default_value_t = 2_400.0)]
    pub(crate) rent: f64,
    #[arg(long, default_value_t = DEFAULT_TARGET_CAP_RATE)]
    pub(crate) cap_rate: f64,
    #[arg(long, default_value_t = DEFAULT_EXPENSE_RATIO)]
    pub(crate) expense_ratio: f64,
    /// Preferred comps source: auto, attom, estated or demo
    #[arg(long, default_value = "auto")]
    pub(crate) source: String,
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS as i64)]
    pub(crate) max_comps: i64,
    /// Print the raw result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl From<AnalyzeArgs> for DealAnalysisRequest {
    fn from(args: AnalyzeArgs) -> Self {
        Self {
            address: args.address,
            price: args.price,
            fallback_price: args.fallback_price,
            down_payment: args.down_payment,
            rate_percent: args.rate,
            years: args.years,
            taxes_month: args.taxes,
            insurance_month: args.insurance,
            hoa_month: args.hoa,
            rent_month: args.rent,
            target_cap_rate: args.cap_rate,
            expense_ratio: args.expense_ratio,
            preferred_source: args.source,
            max_results: Some(args.max_comps),
        }
    }
}

pub(crate) fn run_comps(args: CompsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let lookup = build_lookup(&config)?;

    let result = lookup.find_comps(&args.keyword, args.max_results, &args.source)?;
    if args.json {
        print_json(&result);
    } else {
        render_comps(&result);
    }
    Ok(())
}

pub(crate) fn run_mortgage(args: MortgageArgs) -> Result<(), AppError> {
    let terms = MortgageTerms::new(args.price, args.down_payment, args.rate, args.years)
        .with_escrow(args.taxes, args.insurance, args.hoa)
        .with_rent(args.rent);
    let result = mortgage_summary(&terms)?;

    if args.json {
        print_json(&result);
    } else {
        render_mortgage(&result);
    }
    Ok(())
}

pub(crate) fn run_rent_valuation(args: RentValuationArgs) -> Result<(), AppError> {
    let result = rent_vs_price(args.rent, args.cap_rate, args.expense_ratio)?;
    if args.json {
        print_json(&result);
    } else {
        render_valuation(&result);
    }
    Ok(())
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let lookup = build_lookup(&config)?;

    let json = args.json;
    let max_comps = args.max_comps;
    let analysis = analyze_deal(&lookup, &DealAnalysisRequest::from(args));

    if json {
        print_json(&analysis);
    } else {
        render_analysis(&analysis, max_comps);
    }
    Ok(())
}

fn render_comps(result: &CompsResult) {
    println!("Source: {} | found {}", result.source, result.count);
    if result.results.is_empty() {
        println!("No comps found for this keyword in the current source.");
        return;
    }

    for record in &result.results {
        let price = record
            .price
            .map(format_money)
            .unwrap_or_else(|| "no price".to_string());
        let beds = record
            .beds
            .map(|beds| format!("{beds} bd"))
            .unwrap_or_else(|| "? bd".to_string());
        let baths = record
            .baths
            .map(|baths| format!("{baths} ba"))
            .unwrap_or_else(|| "? ba".to_string());
        let sqft = record
            .sqft
            .map(|sqft| format!("{sqft} sqft"))
            .unwrap_or_else(|| "? sqft".to_string());
        let listed = record.list_date.as_deref().unwrap_or("n/a");
        println!(
            "- {} | {} | {} / {} / {} | listed {}",
            record.address, price, beds, baths, sqft, listed
        );
    }
}

fn render_mortgage(result: &MortgageResult) {
    println!(
        "P&I {} | PITI {} | Cashflow {}",
        format_money(result.principal_interest),
        format_money(result.monthly_payment),
        format_money(result.cashflow)
    );
    println!(
        "LTV {}% | Loan {} | Down {} | Rate {}% | Term {} years",
        result.ltv_percent,
        format_money(result.loan_amount),
        format_money(result.down_payment),
        result.inputs.rate_percent,
        result.inputs.years
    );
    println!(
        "Taxes {} | Insurance {} | HOA {}",
        format_money(result.inputs.taxes_month),
        format_money(result.inputs.insurance_month),
        format_money(result.inputs.hoa_month)
    );
}

fn render_valuation(result: &RentValuationResult) {
    println!(
        "NOI {} @ {}% cap -> Value {}",
        format_money(result.noi),
        result.target_cap_rate,
        format_money(result.implied_value)
    );
}

fn render_analysis(analysis: &DealAnalysis, max_comps: i64) {
    println!("Deal analysis for {}", analysis.address);

    println!("\nComparable properties");
    match (&analysis.comps, &analysis.comps_error) {
        (Some(comps), _) => {
            println!("(max {max_comps} shown)");
            render_comps(comps);
        }
        (None, Some(err)) => println!("Comps lookup error: {err}"),
        (None, None) => println!("No comps yet."),
    }
    if analysis.used_fallback_price {
        println!(
            "Comps missing price; using fallback price {} for analysis.",
            format_money(analysis.price_used)
        );
    }

    println!("\nMortgage & cashflow");
    match (&analysis.mortgage, &analysis.mortgage_error) {
        (Some(result), _) => render_mortgage(result),
        (None, Some(err)) => println!("Mortgage calc error: {err}"),
        (None, None) => println!("No mortgage result (check inputs)."),
    }

    println!("\nRent-based valuation");
    match (&analysis.valuation, &analysis.valuation_error) {
        (Some(result), _) => render_valuation(result),
        (None, Some(err)) => println!("Rent valuation error: {err}"),
        (None, None) => println!("No rent-based valuation (check inputs)."),
    }
}
