use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown placeholder key: {0}")]
pub struct UnknownPlaceholderKey(pub String);

macro_rules! placeholder_keys {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)+) => {
        /// Every dynamic value an offer overlay can display.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PlaceholderKey {
            $($(#[$meta])* $variant,)+
        }

        impl PlaceholderKey {
            pub const ALL: &'static [PlaceholderKey] = &[$(PlaceholderKey::$variant,)+];

            /// Stable snake_case name of the key.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(PlaceholderKey::$variant => $name,)+
                }
            }
        }

        impl FromStr for PlaceholderKey {
            type Err = UnknownPlaceholderKey;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(PlaceholderKey::$variant),)+
                    other => Err(UnknownPlaceholderKey(other.to_string())),
                }
            }
        }
    };
}

placeholder_keys! {
    CustomerName => "customer_name",
    CustomerStreet => "customer_street",
    CustomerCityZip => "customer_city_zip",
    CustomerPhone => "customer_phone",
    CustomerEmail => "customer_email",

    CompanyName => "company_name",
    CompanyStreet => "company_street",
    CompanyCityZip => "company_city_zip",
    CompanyPhone => "company_phone",
    CompanyEmail => "company_email",
    CompanyWebsite => "company_website",
    /// Base64 image data, drawn as the header logo.
    CompanyLogoB64 => "company_logo_b64",

    FooterCompany => "footer_company",
    FooterDate => "footer_date",

    SystemSizeKwp => "system_size_kwp",
    ModuleCountNumber => "module_count_number",
    ModuleCountWithUnit => "module_count_with_unit",
    InverterTotalPowerKw => "inverter_total_power_kw",
    StorageCapacityKwh => "storage_capacity_kwh",
    AnnualProductionKwh => "annual_production_kwh",
    AnnualProductionKwhShort => "annual_production_kwh_short",
    SelfSupplyRatePercent => "self_supply_rate_percent",
    SelfConsumptionPercent => "self_consumption_percent",
    AmortizationTime => "amortization_time",
    SavingsWithBattery => "savings_with_battery",
    SavingsWithBatteryNumber => "savings_with_battery_number",
    SavingsWithoutBattery => "savings_without_battery",
    SavingsWithoutBatteryNumber => "savings_without_battery_number",
    LcoeCentPerKwh => "lcoe_cent_per_kwh",
    IrrPercent => "irr_percent",
    AnnualFeedInRevenueEur => "annual_feed_in_revenue_eur",
    VatAmountEur => "vat_amount_eur",

    DirectSelfConsumptionKwh => "direct_self_consumption_kwh",
    BatteryChargeKwh => "battery_charge_kwh",
    BatteryDischargeForScKwh => "battery_discharge_for_sc_kwh",
    GridFeedInKwh => "grid_feed_in_kwh",
    GridDrawKwh => "grid_draw_kwh",
    AnnualConsumptionKwh => "annual_consumption_kwh",
    ConsumptionDirectKwh => "consumption_direct_kwh",
    ConsumptionBatteryKwh => "consumption_battery_kwh",
    ConsumptionGridKwh => "consumption_grid_kwh",
    BatteryNoteText => "battery_note_text",

    /// Production share exported to the grid, with `%`.
    FeedInQuoteProdPercent => "feed_in_quote_prod_percent",
    /// Production share charged into the battery, with `%`.
    BatteryUseQuoteProdPercent => "battery_use_quote_prod_percent",
    /// Production share consumed directly, number only.
    DirectConsumptionQuoteProdNumber => "direct_consumption_quote_prod_number",
    /// Consumption share covered by the battery, with `%`.
    BatteryCoverConsumptionPercent => "battery_cover_consumption_percent",
    /// Consumption share drawn from the grid, with `%`.
    GridConsumptionRatePercent => "grid_consumption_rate_percent",
    /// Consumption share covered directly by PV, number only.
    DirectCoverConsumptionNumber => "direct_cover_consumption_number",

    ModuleManufacturer => "module_manufacturer",
    ModuleModel => "module_model",
    ModulePowerWp => "module_power_wp",
    ModuleWarrantyYears => "module_warranty_years",
    ModulePerformanceWarranty => "module_performance_warranty",
    ModuleImageB64 => "module_image_b64",

    InverterManufacturer => "inverter_manufacturer",
    InverterDisplayWithQty => "inverter_display_with_qty",
    InverterMaxEfficiencyPercent => "inverter_max_efficiency_percent",
    InverterWarrantyYears => "inverter_warranty_years",
    InverterImageB64 => "inverter_image_b64",

    StorageManufacturer => "storage_manufacturer",
    StorageModel => "storage_model",
    StoragePowerKw => "storage_power_kw",
    StorageDodPercent => "storage_dod_percent",
    StorageCycles => "storage_cycles",
    StorageImageB64 => "storage_image_b64",
}

impl PlaceholderKey {
    /// Share labels next to the flow arrows are centered in their box.
    pub fn is_centered(self) -> bool {
        matches!(
            self,
            PlaceholderKey::FeedInQuoteProdPercent
                | PlaceholderKey::BatteryUseQuoteProdPercent
                | PlaceholderKey::DirectConsumptionQuoteProdNumber
                | PlaceholderKey::BatteryCoverConsumptionPercent
                | PlaceholderKey::GridConsumptionRatePercent
                | PlaceholderKey::DirectCoverConsumptionNumber
        )
    }
}

impl fmt::Display for PlaceholderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
