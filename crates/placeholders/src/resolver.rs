use crate::catalog::CatalogLookup;
use crate::energy::{EnergyFlowQuantities, RawEnergyFlows};
use crate::format::{format_number, format_percent};
use crate::input::{OfferInput, RecordExt, first_nonzero, first_text, number_value};
use crate::key::PlaceholderKey as K;
use crate::partition::partition_percentages;
use crate::values::DynamicValueSet;
use offerpress_traits::{InMemoryCatalog, ProductCatalog, ProductRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

const NO_TITLE: &[&str] = &["", "(kein)", "keine", "none", "null"];

const BATTERY_NOTE: &str = "Hinweis: Batteriespeicher-Jahreswert überschlägig mit \
Speicherkapazität × {days} Tage kalkuliert (statt 365).";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Storage capacities above this many kWh are treated as implausible.
    pub max_storage_capacity_kwh: f64,
    /// When set, annual battery charge and discharge are estimated as
    /// capacity × this many full cycles instead of the simulated sums.
    pub battery_cycle_days: Option<f64>,
    pub vat_rate: f64,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_storage_capacity_kwh: 200.0,
            battery_cycle_days: Some(300.0),
            vat_rate: 0.19,
        }
    }
}

/// Derives display strings for every placeholder key from raw offer data.
///
/// Resolution never fails: each value degrades to an empty string on its
/// own when its inputs are missing or malformed.
#[derive(Debug, Clone)]
pub struct PlaceholderResolver {
    catalog: Arc<dyn ProductCatalog>,
    options: ResolverOptions,
}

impl Default for PlaceholderResolver {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryCatalog::new()))
    }
}

impl PlaceholderResolver {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            catalog,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn resolve(&self, input: &OfferInput) -> DynamicValueSet {
        let mut ctx = Resolution {
            input,
            options: &self.options,
            catalog: CatalogLookup::new(self.catalog.as_ref()),
            values: DynamicValueSet::new(),
        };

        ctx.identity();
        ctx.company();
        ctx.system_kpis();
        let capacity = ctx.storage_capacity();
        let flows = ctx.energy_flows(capacity);
        ctx.derived_kpis(&flows);
        ctx.shares(&flows);
        ctx.economics();
        ctx.module_details();
        ctx.inverter_details();
        ctx.storage_details();

        log::debug!(
            "Resolved {} of {} placeholder values ({} catalog models)",
            ctx.values.populated(),
            ctx.values.len(),
            ctx.catalog.distinct_lookups()
        );
        ctx.values
    }
}

struct Resolution<'a> {
    input: &'a OfferInput,
    options: &'a ResolverOptions,
    catalog: CatalogLookup<'a>,
    values: DynamicValueSet,
}

impl<'a> Resolution<'a> {
    fn customer(&self) -> &'a Map<String, Value> {
        &self.input.customer
    }

    fn details(&self) -> &'a Map<String, Value> {
        &self.input.project_details
    }

    fn analysis(&self) -> &'a Map<String, Value> {
        &self.input.analysis
    }

    fn set_number(&mut self, key: K, value: Option<f64>, decimals: usize, unit: &str) {
        if let Some(v) = value {
            self.values.set(key, format_number(v, decimals, unit));
        }
    }

    fn product(&mut self, model_field: &str) -> (String, ProductRecord) {
        let name = self.details().text(model_field);
        let record = self.catalog.product(&name).cloned().unwrap_or_default();
        (name, record)
    }

    fn identity(&mut self) {
        let c = self.customer();
        let mut title = c.text("title");
        if NO_TITLE.contains(&title.to_lowercase().as_str()) {
            title.clear();
        }
        let name = join_nonempty(&[c.text("salutation"), title, c.text("first_name"), c.text("last_name")]);
        let street = join_nonempty(&[c.text("address"), c.text("house_number")]);
        let city = join_nonempty(&[c.text("zip_code"), c.text("city")]);
        let phone = first_text([c.text("phone_mobile"), c.text("phone_landline")]);
        let email = c.text("email");

        self.values.set(K::CustomerStreet, street);
        self.values.set(K::CustomerCityZip, city);
        self.values.set(K::CustomerPhone, phone);
        self.values.set(K::CustomerEmail, email);
        self.values.set(K::FooterCompany, name.clone());
        self.values.set(K::CustomerName, name);

        let footer_date = match self.input.offer_date {
            Some(date) => format!("Angebot, {}", date.format("%d.%m.%Y")),
            None => "Angebot".to_string(),
        };
        self.values.set(K::FooterDate, footer_date);
    }

    fn company(&mut self) {
        let co = &self.input.company;
        let entries = [
            (K::CompanyName, co.text("name")),
            (K::CompanyStreet, co.text("street")),
            (K::CompanyCityZip, join_nonempty(&[co.text("zip_code"), co.text("city")])),
            (K::CompanyPhone, co.text("phone")),
            (K::CompanyEmail, co.text("email")),
            (K::CompanyWebsite, co.text("website")),
            (K::CompanyLogoB64, co.text("logo_base64")),
        ];
        for (key, value) in entries {
            self.values.set(key, value);
        }
    }

    fn system_kpis(&mut self) {
        let (analysis, details) = (self.analysis(), self.details());

        let module_qty = details.number("module_quantity").or_else(|| analysis.number("module_quantity"));
        let module_wp = details.number("selected_module_capacity_w");
        let system_kwp = analysis.number("anlage_kwp").or_else(|| match (module_qty, module_wp) {
            (Some(qty), Some(wp)) if qty > 0.0 && wp > 0.0 => Some(qty * wp / 1000.0),
            _ => details.number("anlage_kwp"),
        });

        let production = first_nonzero([
            analysis.number("annual_pv_production_kwh"),
            analysis.number("annual_yield_kwh"),
            analysis.number("sim_annual_yield_kwh"),
        ]);

        let inverter_kw = first_nonzero([
            details.number("selected_inverter_power_kw"),
            details.number("inverter_power_kw"),
        ])
        .or_else(|| {
            let single = details.number("selected_inverter_power_kw_single")?;
            let qty = details.number("selected_inverter_quantity").unwrap_or(1.0);
            (qty != 0.0).then_some(single * qty)
        });

        let self_supply = first_nonzero([
            analysis.number("self_supply_rate_percent"),
            analysis.number("self_sufficiency_percent"),
            analysis.number("autarky_percent"),
        ]);
        let self_consumption = analysis.number("self_consumption_percent");
        let amortization = first_nonzero([
            analysis.number("amortization_time_years"),
            analysis.number("amortisationszeit_jahre"),
        ]);

        self.set_number(K::SystemSizeKwp, system_kwp, 2, "kWp");
        if let Some(qty) = module_qty {
            let count = format_number(qty, 0, "");
            self.values.set(K::ModuleCountWithUnit, format!("{} Stück", count));
            self.values.set(K::ModuleCountNumber, count);
        }
        self.set_number(K::AnnualProductionKwh, production, 2, "kWh/Jahr");
        self.set_number(K::AnnualProductionKwhShort, production, 0, "kWh");
        self.set_number(K::InverterTotalPowerKw, inverter_kw, 0, "kW");
        self.set_number(K::SelfSupplyRatePercent, self_supply, 0, "%");
        self.set_number(K::SelfConsumptionPercent, self_consumption, 0, "%");
        self.set_number(K::AmortizationTime, amortization, 2, "Jahre");
    }

    /// Storage capacity in kWh, or `None` for "no storage".
    fn storage_capacity(&mut self) -> Option<f64> {
        let (_, record) = self.product("selected_storage_name");
        let (analysis, details) = (self.analysis(), self.details());
        let bound = self.options.max_storage_capacity_kwh;

        let candidates = [
            record.number("storage_power_kw"),
            record.number("capacity_kwh"),
            record.number("usable_capacity_kwh"),
            record.number("nominal_capacity_kwh"),
            details.number("selected_storage_storage_power_kw"),
            analysis.number("battery_capacity_kwh"),
            details.number("selected_storage_capacity_kwh"),
            details.number("battery_capacity_kwh"),
            analysis.number("selected_storage_storage_power_kw"),
        ];
        let capacity = candidates
            .into_iter()
            .flatten()
            .find(|v| *v > 0.0 && *v <= bound);

        self.set_number(K::StorageCapacityKwh, capacity, 2, "kWh");
        capacity
    }

    fn annual_consumption(&self) -> Option<f64> {
        let (analysis, details, project) = (self.analysis(), self.details(), &self.input.project);
        let nested = project
            .get("consumption_data")
            .and_then(|v| v.get("annual_consumption"))
            .and_then(number_value);

        first_nonzero([
            analysis.number("annual_consumption_kwh"),
            analysis.number("annual_consumption_kwh_yr"),
            analysis.number("total_consumption_kwh_yr"),
            analysis.number("annual_consumption"),
            details.number("annual_consumption_kwh_yr"),
            details.number("annual_consumption_kwh"),
            project.number("annual_consumption_kwh"),
            project.number("annual_consumption"),
            nested,
        ])
        .or_else(|| {
            let household = details.number("annual_consumption_kwh_yr").unwrap_or(0.0);
            let heating = details.number("consumption_heating_kwh_yr").unwrap_or(0.0);
            let total = household + heating;
            (total > 0.0).then_some(total)
        })
    }

    fn energy_flows(&mut self, capacity: Option<f64>) -> EnergyFlowQuantities {
        let analysis = self.analysis();
        let mut raw = RawEnergyFlows {
            production: first_nonzero([
                analysis.number("annual_pv_production_kwh"),
                analysis.number("annual_yield_kwh"),
                analysis.number("sim_annual_yield_kwh"),
            ]),
            consumption: self.annual_consumption(),
            direct_self_consumption: monthly_sum(analysis, "monthly_direct_self_consumption_kwh"),
            battery_charge: monthly_sum(analysis, "monthly_storage_charge_kwh"),
            battery_discharge_for_sc: monthly_sum(analysis, "monthly_storage_discharge_for_sc_kwh"),
            feed_in: analysis.number("netzeinspeisung_kwh"),
            grid_draw: first_nonzero([
                analysis.number("grid_bezug_kwh"),
                analysis.number("grid_purchase_kwh"),
            ]),
        };

        let estimate = capacity.zip(self.options.battery_cycle_days).filter(|(_, days)| *days > 0.0);
        if let Some((capacity, days)) = estimate {
            raw.battery_charge = capacity * days;
            raw.battery_discharge_for_sc = capacity * days;
            self.values.set(
                K::BatteryNoteText,
                BATTERY_NOTE.replace("{days}", &format_number(days, 0, "")),
            );
        }

        let flows = raw.reconcile();
        let nonzero = |v: f64| (v != 0.0).then_some(v);

        self.set_number(K::DirectSelfConsumptionKwh, nonzero(flows.direct_self_consumption), 0, "kWh");
        self.set_number(K::BatteryChargeKwh, nonzero(flows.battery_charge), 0, "kWh");
        self.set_number(K::BatteryDischargeForScKwh, nonzero(flows.battery_discharge_for_sc), 0, "kWh");
        self.set_number(K::GridFeedInKwh, flows.feed_in, 0, "kWh");
        self.set_number(K::GridDrawKwh, flows.grid_draw, 0, "kWh");
        self.set_number(K::AnnualConsumptionKwh, flows.consumption, 0, "kWh");

        if let Some(c) = flows.consumption {
            let direct = flows.direct_self_consumption.min(c);
            let battery = flows.battery_discharge_for_sc.min(c);
            self.set_number(K::ConsumptionDirectKwh, Some(direct), 0, "kWh");
            self.set_number(K::ConsumptionBatteryKwh, Some(battery), 0, "kWh");
            self.set_number(K::ConsumptionGridKwh, Some((c - direct - battery).max(0.0)), 0, "kWh");
        }
        flows
    }

    /// Fills self-consumption and autarky from the flows when the analysis
    /// did not report them.
    fn derived_kpis(&mut self, flows: &EnergyFlowQuantities) {
        let used_on_site = flows.direct_self_consumption + flows.battery_discharge_for_sc;

        if !self.values.is_set(K::SelfConsumptionPercent) {
            let analysis = self.analysis();
            let reported = match (
                analysis.get("direktverbrauch_anteil_pv_produktion_pct"),
                analysis.get("speichernutzung_anteil_pv_produktion_pct"),
            ) {
                (Some(Value::Number(direct)), Some(Value::Number(battery))) => {
                    direct.as_f64().zip(battery.as_f64()).map(|(d, b)| d + b)
                }
                _ => None,
            };
            let derived = reported.or_else(|| {
                let p = flows.production.filter(|p| *p > 0.0)?;
                (used_on_site > 0.0).then_some(100.0 * used_on_site / p)
            });
            self.set_number(K::SelfConsumptionPercent, derived.map(clamp_percent), 0, "%");
        }

        if !self.values.is_set(K::SelfSupplyRatePercent) {
            let derived = flows
                .consumption
                .filter(|c| *c > 0.0 && used_on_site > 0.0)
                .map(|c| 100.0 * used_on_site / c);
            self.set_number(K::SelfSupplyRatePercent, derived.map(clamp_percent), 0, "%");
        }
    }

    fn shares(&mut self, flows: &EnergyFlowQuantities) {
        if let Some(raw) = flows.production_shares() {
            let [direct, battery, feed_in] = partition_percentages(raw);
            self.values.set(K::DirectConsumptionQuoteProdNumber, direct.to_string());
            self.values.set(K::BatteryUseQuoteProdPercent, format_percent(battery));
            self.values.set(K::FeedInQuoteProdPercent, format_percent(feed_in));
        }
        if let Some(raw) = flows.consumption_shares() {
            let [direct, battery, grid] = partition_percentages(raw);
            self.values.set(K::DirectCoverConsumptionNumber, direct.to_string());
            self.values.set(K::BatteryCoverConsumptionPercent, format_percent(battery));
            self.values.set(K::GridConsumptionRatePercent, format_percent(grid));
        }
    }

    fn economics(&mut self) {
        let analysis = self.analysis();
        let savings_with = analysis.number("savings_20y_with_battery_eur");
        let savings_without = analysis.number("savings_20y_without_battery_eur");
        let lcoe_cent = match analysis.get("lcoe_euro_per_kwh") {
            Some(Value::Number(n)) => n.as_f64().map(|eur| eur * 100.0),
            _ => None,
        };
        let irr = analysis.number("irr_percent");
        let feed_in_revenue = first_nonzero([
            analysis.number("annual_feedin_revenue_euro"),
            analysis.number("annual_feed_in_revenue_year1"),
        ]);

        let net_base = first_nonzero(
            ["total_investment_netto", "final_price", "subtotal_netto"]
                .map(|field| match analysis.get(field) {
                    Some(Value::Number(n)) => n.as_f64(),
                    _ => None,
                }),
        );
        let vat = match net_base {
            Some(net) => Some(net * self.options.vat_rate),
            None => analysis
                .number("total_investment_brutto")
                .zip(analysis.number("total_investment_netto"))
                .map(|(gross, net)| (gross - net).max(0.0)),
        };

        self.set_number(K::SavingsWithBattery, savings_with, 2, "EUR*");
        self.set_number(K::SavingsWithBatteryNumber, savings_with, 0, "");
        self.set_number(K::SavingsWithoutBattery, savings_without, 2, "EUR*");
        self.set_number(K::SavingsWithoutBatteryNumber, savings_without, 0, "");
        self.set_number(K::LcoeCentPerKwh, lcoe_cent, 1, "Cent");
        self.set_number(K::IrrPercent, irr, 1, "%");
        self.set_number(K::AnnualFeedInRevenueEur, feed_in_revenue, 2, "€");
        self.set_number(K::VatAmountEur, vat, 2, "€");
    }

    fn module_details(&mut self) {
        let (name, record) = self.product("selected_module_name");
        if name.is_empty() && record.is_empty() {
            return;
        }
        let details = self.details();

        let power = record
            .number("capacity_w")
            .or_else(|| details.number("selected_module_capacity_w"));
        let performance = match (
            record.number("performance_warranty_years"),
            first_nonzero([
                record.number("performance_warranty_percent"),
                record.number("efficiency_percent_end"),
            ]),
        ) {
            (Some(years), Some(pct)) => format!(
                "{} / {}",
                format_number(years, 0, "Jahre"),
                format_number(pct, 0, "%")
            ),
            _ => String::new(),
        };

        self.values.set(K::ModuleManufacturer, brand(&record));
        self.values.set(K::ModuleModel, first_text([record.text("model_name"), name]));
        self.set_number(K::ModulePowerWp, power, 0, "Wp");
        self.set_number(K::ModuleWarrantyYears, record.number("warranty_years"), 0, "Jahre");
        self.values.set(K::ModulePerformanceWarranty, performance);
        self.values.set(K::ModuleImageB64, record.text("image_base64"));
    }

    fn inverter_details(&mut self) {
        let (name, record) = self.product("selected_inverter_name");
        if name.is_empty() && record.is_empty() {
            return;
        }
        let qty = self
            .details()
            .number("selected_inverter_quantity")
            .filter(|q| *q >= 1.0)
            .map(|q| q.trunc() as u64)
            .unwrap_or(1);
        let display = if qty > 1 && !name.is_empty() {
            format!("{}x {}", qty, name)
        } else {
            name
        };

        self.values.set(K::InverterManufacturer, brand(&record));
        self.values.set(K::InverterDisplayWithQty, display);
        self.set_number(K::InverterMaxEfficiencyPercent, record.number("efficiency_percent"), 0, "%");
        self.set_number(K::InverterWarrantyYears, record.number("warranty_years"), 0, "Jahre");
        self.values.set(K::InverterImageB64, record.text("image_base64"));
    }

    fn storage_details(&mut self) {
        let (name, record) = self.product("selected_storage_name");
        let include_storage = self
            .details()
            .get("include_storage")
            .is_some_and(is_truthy);
        if name.is_empty() && record.is_empty() && !include_storage {
            return;
        }

        let power = first_nonzero([record.number("power_kw"), record.number("storage_power_kw")]);
        let dod = first_nonzero([
            record.number("dod_percent"),
            self.analysis().number("storage_dod_percent"),
        ]);
        let cycles = record
            .number("max_cycles")
            .map(|c| format!("{} cycles", c.trunc() as i64))
            .unwrap_or_default();

        self.values.set(K::StorageManufacturer, brand(&record));
        self.values.set(K::StorageModel, first_text([record.text("model_name"), name]));
        self.set_number(K::StoragePowerKw, power, 1, "kW");
        self.set_number(K::StorageDodPercent, dod, 0, "%");
        self.values.set(K::StorageCycles, cycles);
        self.values.set(K::StorageImageB64, record.text("image_base64"));
    }
}

fn brand(record: &ProductRecord) -> String {
    first_text([record.text("brand"), record.text("manufacturer")])
}

fn join_nonempty(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn monthly_sum(record: &Map<String, Value>, field: &str) -> f64 {
    match record.get(field) {
        Some(Value::Array(months)) => months.iter().filter_map(number_value).sum(),
        _ => 0.0,
    }
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}
