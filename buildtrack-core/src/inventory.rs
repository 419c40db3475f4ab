//! Bounded stock adjustment and bulk-import reconciliation for PCCC materials.

use serde::{Deserialize, Serialize};
use time::Date;
use tracing::debug;

use crate::domain::{MaterialId, PcccCategory, PcccMaterial};

const DEFAULT_NAME: &str = "Unnamed material";
const DEFAULT_UNIT: &str = "pcs";
const MIN_POPULATED_FIELDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockAdjustment {
    /// The clamped quantity differs from the current one.
    Applied(PcccMaterial),
    /// The adjustment was absorbed by a bound; nothing to persist.
    NoOp,
}

/// Move `available_quantity` by `delta`, clamped to `[0, total_quantity]`.
pub fn adjust_available(material: &PcccMaterial, delta: i64, today: Date) -> StockAdjustment {
    let total = i64::from(material.total_quantity);
    let current = i64::from(material.available_quantity);
    let next = current.saturating_add(delta).clamp(0, total);

    if next == current {
        return StockAdjustment::NoOp;
    }

    let mut updated = material.clone();
    // `next` lies in [0, total] and total came from a u32
    updated.available_quantity = u32::try_from(next).unwrap_or(material.total_quantity);
    updated.refresh_status(today);
    StockAdjustment::Applied(updated)
}

/// One data line of an import file, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.trim()).unwrap_or("")
    }

    fn populated(&self) -> usize {
        self.fields.iter().filter(|f| !f.trim().is_empty()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    pub records: Vec<PcccMaterial>,
    pub skipped: Vec<SkippedRow>,
}

/// Split delimited text into raw rows.
///
/// The delimiter (comma, semicolon or tab) is whichever occurs most in the
/// header line; the header itself is dropped, as are blank lines. A field
/// opening with a double quote runs to the closing quote and may contain the
/// delimiter; `""` inside it is a literal quote. Fields are trimmed.
pub fn split_import_lines(text: &str) -> Vec<RawRow> {
    let mut lines = text.lines().enumerate();
    let Some((_, header)) = lines.next() else {
        return Vec::new();
    };
    let delimiter = detect_delimiter(header);

    lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| RawRow::new(index + 1, split_fields(line, delimiter)))
        .collect()
}

fn detect_delimiter(header: &str) -> char {
    // Ties go to the comma.
    [';', '\t', ',']
        .into_iter()
        .max_by_key(|d| header.matches(*d).count())
        .unwrap_or(',')
}

fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                quoted = true;
            }
            c if c == delimiter && !quoted => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            c => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

/// Turn raw rows into material records.
///
/// Positional fields: name, category, spec, unit, total, available, min
/// stock, expiry. Malformed quantities become 0. Short rows and rows with an
/// unknown category are reported in [`ImportBatch::skipped`].
pub fn parse_import_batch(rows: &[RawRow], today: Date, id_prefix: &str) -> ImportBatch {
    let mut batch = ImportBatch::default();

    for row in rows {
        match parse_row(row, today, id_prefix) {
            Ok(material) => batch.records.push(material),
            Err(reason) => {
                debug!(line = row.line, %reason, "Skipping import row");
                batch.skipped.push(SkippedRow {
                    line: row.line,
                    reason,
                });
            }
        }
    }

    batch
}

fn parse_row(row: &RawRow, today: Date, id_prefix: &str) -> Result<PcccMaterial, String> {
    let populated = row.populated();
    if populated < MIN_POPULATED_FIELDS {
        return Err(format!(
            "expected at least {MIN_POPULATED_FIELDS} fields, found {populated}"
        ));
    }

    let category = match row.field(1) {
        "" => PcccCategory::Pipe,
        value => value
            .parse::<PcccCategory>()
            .map_err(|_| format!("unknown category '{value}'"))?,
    };

    let name = non_empty_or(row.field(0), DEFAULT_NAME);
    let unit = non_empty_or(row.field(3), DEFAULT_UNIT);

    let mut material = PcccMaterial::new(
        MaterialId::new(format!("{id_prefix}-{}", row.line)),
        name,
        category,
        unit,
    )
    .with_spec(row.field(2))
    .with_quantities(
        parse_quantity(row.field(4)),
        parse_quantity(row.field(5)),
        parse_quantity(row.field(6)),
    );

    if !row.field(7).is_empty() {
        material = material.with_expiry(row.field(7));
    }

    material.normalize(today);
    Ok(material)
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

fn parse_quantity(value: &str) -> u32 {
    value.parse().unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseStats {
    pub item_count: usize,
    pub low_stock: usize,
    pub expired: usize,
    /// Sum of `total_quantity` over all records.
    pub total_quantity: u64,
}

impl WarehouseStats {
    /// Counts are evaluated against `today`, not the stored status. An
    /// expired item that is also short on stock counts in both buckets.
    pub fn from_materials(materials: &[PcccMaterial], today: Date) -> Self {
        materials.iter().fold(Self::default(), |mut stats, m| {
            stats.item_count += 1;
            stats.total_quantity += u64::from(m.total_quantity);
            if m.is_low_stock() {
                stats.low_stock += 1;
            }
            if m.is_expired(today) {
                stats.expired += 1;
            }
            stats
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MaterialFilter {
    pub category: Option<PcccCategory>,
    pub search: Option<String>,
}

impl MaterialFilter {
    pub fn matches(&self, material: &PcccMaterial) -> bool {
        if self.category.is_some_and(|c| c != material.category) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                material.name.to_lowercase().contains(&term)
                    || material.spec.to_lowercase().contains(&term)
            }
        }
    }

    pub fn apply<'a>(&self, materials: &'a [PcccMaterial]) -> Vec<&'a PcccMaterial> {
        materials.iter().filter(|m| self.matches(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StockStatus;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 05 - 01);

    fn stocked(total: u32, available: u32, min: u32) -> PcccMaterial {
        let mut material = PcccMaterial::new("m1", "Sprinkler head K80", PcccCategory::Sprinkler, "pcs")
            .with_quantities(total, available, min);
        material.refresh_status(TODAY);
        material
    }

    #[test]
    fn adjustment_crosses_into_low_stock() {
        let material = stocked(1000, 800, 200);
        assert_eq!(material.status, StockStatus::Good);

        let StockAdjustment::Applied(updated) = adjust_available(&material, -650, TODAY) else {
            panic!("expected an applied adjustment");
        };
        assert_eq!(updated.available_quantity, 150);
        assert_eq!(updated.status, StockStatus::LowStock);
        // Input untouched.
        assert_eq!(material.available_quantity, 800);
    }

    #[test]
    fn adjustment_clamps_to_bounds() {
        let material = stocked(10, 8, 2);

        let StockAdjustment::Applied(full) = adjust_available(&material, 50, TODAY) else {
            panic!("expected an applied adjustment");
        };
        assert_eq!(full.available_quantity, 10);

        let StockAdjustment::Applied(empty) = adjust_available(&material, -50, TODAY) else {
            panic!("expected an applied adjustment");
        };
        assert_eq!(empty.available_quantity, 0);
        assert_eq!(empty.status, StockStatus::LowStock);
    }

    #[test]
    fn adjustment_at_a_bound_is_a_noop() {
        assert_eq!(adjust_available(&stocked(10, 10, 2), 1, TODAY), StockAdjustment::NoOp);
        assert_eq!(adjust_available(&stocked(10, 0, 2), -1, TODAY), StockAdjustment::NoOp);
        assert_eq!(adjust_available(&stocked(10, 5, 2), 0, TODAY), StockAdjustment::NoOp);
    }

    #[test]
    fn adjustment_survives_extreme_deltas() {
        let material = stocked(10, 5, 2);
        assert!(matches!(
            adjust_available(&material, i64::MIN, TODAY),
            StockAdjustment::Applied(m) if m.available_quantity == 0
        ));
        assert!(matches!(
            adjust_available(&material, i64::MAX, TODAY),
            StockAdjustment::Applied(m) if m.available_quantity == 10
        ));
    }

    #[test]
    fn split_skips_header_and_blank_lines() {
        let text = "name,category,spec,unit,total,available,min,expiry\n\
                    \"Hose reel\",Cabinet,D25,set,10,8,2,\n\
                    \n   \n\
                    Alarm bell , Alarm ,24V,pcs,5,5,1,2025-01-01\r\n";
        let rows = split_import_lines(text);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].fields[0], "Hose reel");
        assert_eq!(rows[1].line, 5);
        assert_eq!(rows[1].fields[1], "Alarm");
        assert_eq!(rows[1].fields[7], "2025-01-01");
    }

    #[test]
    fn quoted_fields_keep_embedded_delimiters() {
        let rows = split_import_lines(
            "name,category,spec,unit,total,available,min,expiry\n\
             \"Sprinkler, pendent\",Sprinkler,K80,pcs,10,10,2,\n\
             \"Cabinet \"\"B\"\"\", Cabinet ,\"\",set,4,4,1,\n",
        );

        assert_eq!(rows[0].fields[0], "Sprinkler, pendent");
        assert_eq!(rows[0].fields[1], "Sprinkler");
        assert_eq!(rows[0].fields.len(), 8);
        assert_eq!(rows[1].fields[0], "Cabinet \"B\"");
        assert_eq!(rows[1].fields[2], "");

        let batch = parse_import_batch(&rows, TODAY, "import");
        assert!(batch.skipped.is_empty());
        assert_eq!(batch.records[0].name, "Sprinkler, pendent");
        assert_eq!(batch.records[0].category, PcccCategory::Sprinkler);
    }

    #[test]
    fn delimiter_follows_the_header() {
        let semicolons = split_import_lines(
            "name;category;spec;unit;total;available;min;expiry\n\
             Gate valve, flanged;Valve;DN100;pcs;20;20;5;\n",
        );
        assert_eq!(semicolons[0].fields[0], "Gate valve, flanged");
        assert_eq!(semicolons[0].fields[4], "20");

        let tabs = split_import_lines("name\tcategory\tspec\tunit\nHose\tCabinet\tD50\troll\n");
        assert_eq!(tabs[0].fields, vec!["Hose", "Cabinet", "D50", "roll"]);

        assert!(split_import_lines("").is_empty());
    }

    #[test]
    fn import_defaults_and_lenient_numbers() {
        let rows = vec![RawRow::new(
            2,
            ["", "", "DN50", "m", "", "", "", ""]
                .map(String::from)
                .to_vec(),
        )];
        let batch = parse_import_batch(&rows, TODAY, "import");
        assert!(batch.records.is_empty());
        assert_eq!(batch.skipped.len(), 1);

        let rows = vec![RawRow::new(
            3,
            ["Hose", "", "DN50", "m", "", "", "", ""]
                .map(String::from)
                .to_vec(),
        )];
        let batch = parse_import_batch(&rows, TODAY, "import");
        assert_eq!(batch.skipped.len(), 1, "three populated fields is still short");

        let rows = vec![RawRow::new(
            4,
            ["", "", "DN50", "m", "abc", "-3", "4"].map(String::from).to_vec(),
        )];
        let batch = parse_import_batch(&rows, TODAY, "import");
        let record = &batch.records[0];

        assert_eq!(record.id.as_str(), "import-4");
        assert_eq!(record.name, DEFAULT_NAME);
        assert_eq!(record.category, PcccCategory::Pipe);
        assert_eq!(record.unit, "m");
        assert_eq!(record.total_quantity, 0);
        assert_eq!(record.available_quantity, 0);
        assert_eq!(record.min_stock_level, 4);
        assert_eq!(record.inspection_expiry, None);
        assert_eq!(record.status, StockStatus::LowStock);

        // No partial numbers: a count is either a whole integer or 0.
        let rows = vec![RawRow::new(
            5,
            ["Hose", "", "DN50", "m", "12.5", "12 pcs", "2"].map(String::from).to_vec(),
        )];
        let record = &parse_import_batch(&rows, TODAY, "import").records[0];
        assert_eq!(record.total_quantity, 0);
        assert_eq!(record.available_quantity, 0);
        assert_eq!(record.min_stock_level, 2);
    }

    #[test]
    fn import_computes_status_and_clamps_available() {
        let rows = split_import_lines(
            "header\n\
             Extinguisher MFZ4,extinguisher,4kg,pcs,50,40,10,2023-12-01\n\
             Gate valve,Valve,DN100,pcs,20,35,2,\n\
             Curtain,Curtain,E60,m2,3,3,1,\n",
        );
        let batch = parse_import_batch(&rows, TODAY, "pccc-import");

        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].category, PcccCategory::Extinguisher);
        assert_eq!(batch.records[0].status, StockStatus::Expired);
        assert_eq!(batch.records[1].available_quantity, 20);
        assert_eq!(batch.records[1].status, StockStatus::Good);

        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].line, 4);
        assert!(batch.skipped[0].reason.contains("Curtain"));
    }

    #[test]
    fn stats_and_filter() {
        let good = stocked(100, 50, 10);
        let low = stocked(100, 5, 10);
        let mut expired = PcccMaterial::new("m3", "Powder extinguisher", PcccCategory::Extinguisher, "pcs")
            .with_quantities(30, 30, 5)
            .with_expiry("2024-01-01")
            .with_spec("MFZ8");
        expired.refresh_status(TODAY);
        let all = vec![good, low, expired];

        let stats = WarehouseStats::from_materials(&all, TODAY);
        assert_eq!(stats.item_count, 3);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.total_quantity, 230);

        let by_category = MaterialFilter {
            category: Some(PcccCategory::Extinguisher),
            search: None,
        };
        assert_eq!(by_category.apply(&all).len(), 1);

        let by_spec = MaterialFilter {
            category: None,
            search: Some("mfz".to_string()),
        };
        assert_eq!(by_spec.apply(&all)[0].id.as_str(), "m3");

        assert_eq!(MaterialFilter::default().apply(&all).len(), 3);
    }

    #[test]
    fn stats_use_live_expiry_and_count_both_buckets() {
        // Stored as Good two days before its inspection lapsed.
        let mut lapsed = PcccMaterial::new("m", "Hose cabinet", PcccCategory::Cabinet, "set")
            .with_quantities(10, 10, 2)
            .with_expiry("2024-03-10");
        lapsed.refresh_status(date!(2024 - 03 - 09));
        assert_eq!(lapsed.status, StockStatus::Good);

        let mut short_and_expired = PcccMaterial::new("b", "Alarm bell", PcccCategory::Alarm, "pcs")
            .with_quantities(10, 1, 5)
            .with_expiry("2024-01-01");
        short_and_expired.refresh_status(date!(2024 - 03 - 09));

        let stats = WarehouseStats::from_materials(&[lapsed, short_and_expired], date!(2024 - 03 - 12));
        assert_eq!(stats.expired, 2);
        assert_eq!(stats.low_stock, 1);
    }
}
