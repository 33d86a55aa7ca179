//! Shared fixtures for tests.

use time::{Date, Month, PrimitiveDateTime, Time, macros::datetime};

use crate::sale::{NewSaleRecord, SaleRecord};

const CATEGORIES: [&str; 4] = [
    "electronics",
    "jewelery",
    "men's clothing",
    "women's clothing",
];

/// Three records: two sold in March, one in April.
pub(crate) fn scenario_records() -> Vec<NewSaleRecord> {
    vec![
        SaleRecord::build("Mug", 50.0, datetime!(2021-03-05 10:00 UTC))
            .category("kitchen")
            .sold(true),
        SaleRecord::build("Lamp", 150.0, datetime!(2022-03-20 18:30 UTC))
            .category("home")
            .sold(false),
        SaleRecord::build("Ring", 999.0, datetime!(2021-04-02 09:15 UTC))
            .category("jewelery")
            .sold(true),
    ]
}

/// A catalog spread over every month of two years with prices from every
/// histogram bucket.
pub(crate) fn catalog() -> Vec<NewSaleRecord> {
    (0..96u32)
        .map(|i| {
            let year = 2021 + ((i / 12) % 2) as i32;
            let month = Month::try_from((i % 12) as u8 + 1).unwrap();
            let day = (i % 28) as u8 + 1;
            let date = Date::from_calendar_date(year, month, day).unwrap();
            let date_of_sale = PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc();
            let price = (i * 53 % 1100) as f64 + if i % 3 == 0 { 0.5 } else { 0.0 };

            SaleRecord::build(&format!("Product {i}"), price, date_of_sale)
                .description(&format!("Description of product {i}"))
                .category(CATEGORIES[i as usize % CATEGORIES.len()])
                .sold(i % 5 != 0)
        })
        .collect()
}
