// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use rxcheck_app::{Invoice, InvoiceId, InvoiceStatus, Ledger, LineItem, LineItemId};
use time::{Date, Month};

const SUPPLIERS: [(&str, &str); 8] = [
    ("Daehan Pharm Co.", "DHP"),
    ("Green Cross Corp.", "GC"),
    ("VitaHouse", "VH"),
    ("Hanmi Pharmaceutical", "HM"),
    ("Chong Kun Dang", "CKD"),
    ("Yuhan Corporation", "YH"),
    ("Boryung Pharma", "BR"),
    ("Dong-A Pharmtec", "DA"),
];

const PRODUCT_NAMES: [&str; 14] = [
    "Naksan probiotic (export)",
    "Supercritical rTG omega-3 POLAR",
    "Lutein zeaxanthin 164",
    "Taxen soft capsule",
    "Bemax meta tablet",
    "Genol cool patch",
    "Milk thistle complex",
    "Vitamin D 5000 IU",
    "Red ginseng extract stick",
    "Magnesium glycinate 400",
    "Eye care astaxanthin",
    "Chondroitin 1200",
    "Propolis spray",
    "Iron plus folic acid",
];

const STANDARDS: [&str; 8] = [
    "30C", "60C", "100T", "10C", "30C x 2", "5 patches", "20ml x 30", "90T",
];

const NOTES: [&str; 6] = [
    "",
    "promo item",
    "shelf display",
    "no returns",
    "cold chain",
    "",
];

const STATUSES: [InvoiceStatus; 4] = [
    InvoiceStatus::Completed,
    InvoiceStatus::Analyzing,
    InvoiceStatus::Failed,
    InvoiceStatus::Pending,
];

const REFERENCE_YEAR: i32 = 2026;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u64() % (span as u64)) as i64
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceFaker {
    rng: DeterministicRng,
    next_item_id: i64,
}

impl InvoiceFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeterministicRng::new(if seed == 0 { 1 } else { seed }),
            next_item_id: 1,
        }
    }

    pub fn invoice(&mut self, sequence: usize) -> Invoice {
        let (supplier, prefix) = SUPPLIERS[self.rng.int_n(SUPPLIERS.len())];
        let number = format!("{REFERENCE_YEAR}-{:03}", sequence + 1);
        let status = STATUSES[self.rng.int_n(STATUSES.len())];
        Invoice {
            id: InvoiceId::new(format!("INV-{number}")),
            title: format!("{supplier} | {number}"),
            status,
            total_amount: self.rng.int_range_i64(50_000, 2_000_000),
            image_name: format!("{REFERENCE_YEAR}0106_{prefix}_{:03}.jpg", sequence + 1),
            page_label: String::new(),
        }
    }

    pub fn line_item(&mut self, invoice_id: &InvoiceId) -> LineItem {
        let id = self.next_item_id;
        self.next_item_id += 1;

        let lot = if self.rng.int_n(5) == 0 {
            String::new()
        } else {
            format!(
                "{}{:06}",
                char::from(b'A' + (self.rng.int_n(6) as u8)),
                self.rng.int_range_i64(0, 999_999),
            )
        };

        LineItem {
            id: LineItemId::new(id),
            invoice_id: invoice_id.clone(),
            name: PRODUCT_NAMES[self.rng.int_n(PRODUCT_NAMES.len())].to_owned(),
            standard: STANDARDS[self.rng.int_n(STANDARDS.len())].to_owned(),
            qty: self.rng.int_range_i64(1, 120),
            price: self.rng.int_range_i64(500, 50_000),
            lot,
            expiry: self.expiry_date(),
            note: NOTES[self.rng.int_n(NOTES.len())].to_owned(),
        }
    }

    pub fn ledger(&mut self, invoice_count: usize, items_per_invoice: usize) -> Ledger {
        let mut invoices = Vec::with_capacity(invoice_count);
        let mut items = Vec::with_capacity(invoice_count * items_per_invoice);

        for sequence in 0..invoice_count {
            let mut invoice = self.invoice(sequence);
            invoice.page_label = format!("Page {}/{invoice_count}", sequence + 1);
            for _ in 0..items_per_invoice {
                items.push(self.line_item(&invoice.id));
            }
            invoices.push(invoice);
        }

        Ledger::new(invoices, items).expect("faker output is referentially consistent")
    }

    fn expiry_date(&mut self) -> Option<Date> {
        if self.rng.int_n(10) == 0 {
            return None;
        }
        let year = REFERENCE_YEAR + self.rng.int_range_i64(1, 3) as i32;
        let month = Month::try_from(1 + self.rng.int_n(12) as u8).expect("valid month index");
        let day = 1 + self.rng.int_n(28) as u8;
        Some(Date::from_calendar_date(year, month, day).expect("valid calendar date"))
    }
}

#[cfg(test)]
mod tests {
    use super::InvoiceFaker;
    use rxcheck_app::InvoiceId;
    use std::collections::BTreeSet;

    #[test]
    fn same_seed_same_ledger() {
        let left = InvoiceFaker::new(42).ledger(3, 4);
        let right = InvoiceFaker::new(42).ledger(3, 4);
        assert_eq!(left, right);
    }

    #[test]
    fn ledger_shape_matches_request() {
        let ledger = InvoiceFaker::new(7).ledger(2, 3);
        let groups = ledger.groups_in_display_order();
        assert_eq!(groups.len(), 2);
        for (_, items) in &groups {
            assert_eq!(items.len(), 3);
        }
    }

    #[test]
    fn invoice_ids_are_sequential_and_unique() {
        let ledger = InvoiceFaker::new(9).ledger(4, 1);
        let ids: Vec<&InvoiceId> = ledger.invoices().iter().map(|invoice| &invoice.id).collect();
        assert_eq!(ids[0], &InvoiceId::new("INV-2026-001"));
        assert_eq!(ids[3], &InvoiceId::new("INV-2026-004"));
        assert_eq!(ids.iter().collect::<BTreeSet<_>>().len(), 4);
    }

    #[test]
    fn item_values_respect_model_invariants() {
        let mut faker = InvoiceFaker::new(11);
        let invoice = faker.invoice(0);
        for _ in 0..50 {
            let item = faker.line_item(&invoice.id);
            assert!(item.qty >= 1);
            assert!(item.price >= 500);
            assert!(!item.name.is_empty());
        }
    }

    #[test]
    fn variety_across_seeds() {
        let mut names = BTreeSet::new();
        for seed in 0_u64..20_u64 {
            let mut faker = InvoiceFaker::new(seed);
            let invoice = faker.invoice(0);
            names.insert(faker.line_item(&invoice.id).name);
        }
        assert!(names.len() >= 5, "got {}", names.len());
    }
}
