use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::money::{round_to, CURRENCY_DECIMALS};
use crate::price::BestPrices;
use crate::stake::StakeAllocation;

pub fn tabulate_best_prices(best_prices: &BestPrices) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Outcome".into(), "Book".into(), "Odds".into(), "Implied".into()],
        ));
    for (outcome, price) in best_prices.iter() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                outcome.into(),
                price.book.as_str().into(),
                format!("{:.2}", price.odds).into(),
                format!("{:.4}", price.implied_probability()).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Σ".into(),
            "".into(),
            "".into(),
            format!("{:.4}", best_prices.implied_sum()).into(),
        ],
    ));
    table
}

pub fn tabulate_allocation(allocation: &StakeAllocation) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Outcome".into(),
                "Book".into(),
                "Odds".into(),
                "Stake".into(),
                "Payout".into(),
            ],
        ));
    for (outcome, stake) in &allocation.stakes {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                outcome.as_str().into(),
                stake.book.as_str().into(),
                format!("{:.2}", stake.odds).into(),
                format_money(stake.amount).into(),
                format_money(stake.payout()).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Total".into(),
            "".into(),
            "".into(),
            format_money(allocation.budget).into(),
            format!(
                "{} (+{}, {:.2}%)",
                format_money(allocation.payout),
                format_money(allocation.profit),
                allocation.profit_pct
            )
            .into(),
        ],
    ));
    table
}

/// Formats a currency amount at presentation precision.
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", round_to(amount, CURRENCY_DECIMALS))
}
