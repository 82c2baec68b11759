use bookarb::print::format_money;
use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::scan::{Opportunity, ScanReport};

pub fn tabulate_opportunities(opportunities: &[Opportunity]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(24)).with(Left)),
            Col::new(Styles::default().with(MinWidth(18)).with(Left)),
            Col::new(Styles::default().with(MinWidth(14)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Event".into(),
                "Starts".into(),
                "Market".into(),
                "Σ".into(),
                "Profit %".into(),
                "Payout".into(),
            ],
        ));
    for opportunity in opportunities {
        let payout = opportunity
            .allocation
            .as_ref()
            .map(|allocation| format_money(allocation.payout))
            .unwrap_or_default();
        table.push_row(Row::new(
            Styles::default(),
            vec![
                opportunity.event.to_string().into(),
                opportunity.event.commence_time.format("%Y-%m-%d %H:%M").to_string().into(),
                opportunity.market.to_string().into(),
                format!("{:.4}", opportunity.arbitrage.implied_sum).into(),
                format!("{:.2}", opportunity.arbitrage.profit_pct).into(),
                payout.into(),
            ],
        ));
    }
    table
}

/// How the snapshots of a scan were disposed of.
pub fn tabulate_summary(report: &ScanReport) -> Table {
    let rows = [
        ("Evaluated", report.evaluated),
        ("Arbitrage", report.opportunities.len()),
        ("No arbitrage", report.no_arbitrage),
        ("Incomplete", report.incomplete),
        ("Failed fetches", report.failed_fetches),
    ];
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(16)).with(Left)),
        Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
    ]);
    for (label, count) in rows {
        table.push_row(Row::new(Styles::default(), vec![label.into(), count.to_string().into()]));
    }
    table
}
