/// Каталог масел для необязательного поля "тип масла"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OilBrand {
    pub brand: &'static str,
    pub types: &'static [&'static str],
}

/// Бренды отсортированы по алфавиту
pub const OIL_BRANDS: [OilBrand; 6] = [
    OilBrand { brand: "Castrol", types: &["EDGE 0W-40", "EDGE 5W-40", "Magnatec 5W-40"] },
    OilBrand { brand: "Liqui Moly", types: &["Top Tec 0W-40", "Molygen 5W-40", "Optimal 10W-40"] },
    OilBrand { brand: "Mobil", types: &["Mobil 1 0W-40", "Mobil 1 5W-40", "Super 3000 5W-40"] },
    OilBrand { brand: "Shell", types: &["Helix Ultra 0W-40", "Helix Ultra 5W-40", "Helix HX8 5W-40"] },
    OilBrand { brand: "Total", types: &["Quartz 9000 5W-40", "Quartz Ineo 5W-30"] },
    OilBrand { brand: "ZIC", types: &["X9 5W-40", "X7 5W-40", "X5 10W-40"] },
];

/// Все варианты "Бренд Тип" одним списком, для подсказки в консоли
pub fn all_oil_options() -> Vec<String> {
    OIL_BRANDS
        .iter()
        .flat_map(|oil| oil.types.iter().map(move |t| format!("{} {}", oil.brand, t)))
        .collect()
}
