use crate::key::PlaceholderKey;

/// What a template sample text is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotBinding {
    /// Display the resolved value of a key.
    Key(PlaceholderKey),
    /// Display a fixed label instead of the template's sample.
    Label(&'static str),
}

impl SlotBinding {
    pub fn key(self) -> Option<PlaceholderKey> {
        match self {
            SlotBinding::Key(key) => Some(key),
            SlotBinding::Label(_) => None,
        }
    }
}

/// Maps a descriptor sample text onto its binding. Unmapped samples return
/// `None` and are rendered verbatim.
///
/// Several samples can bind to the same key; the templates contain more than
/// one spelling for some slots.
pub fn binding_for_sample(sample: &str) -> Option<SlotBinding> {
    use PlaceholderKey::*;
    use SlotBinding::{Key, Label};

    let binding = match sample {
        // Customer block, page 1
        "qwe qe" => Key(CustomerName),
        "Auf den Wöörden 23" => Key(CustomerStreet),
        "22359 Hamburg" => Key(CustomerCityZip),
        "Tel: 0155555555" => Key(CustomerPhone),
        "oemertimur@gmail.com" => Key(CustomerEmail),

        // Company block
        "TommaTech GmbH" => Key(CompanyName),
        "Zeppelinstraße 14" => Key(CompanyStreet),
        "85748 Garching b. München" => Key(CompanyCityZip),
        "Tel: +49 89 1250 36 860" => Key(CompanyPhone),
        "mail@tommatech.de" => Key(CompanyEmail),

        // Footer on every page
        "tom-90" => Key(FooterCompany),
        "29.11.2024" => Key(FooterDate),

        // KPI page. The two EUR samples sit in slots that now show system
        // size and payback time.
        "36.958,00 EUR*" | "8,4 kWp" => Key(SystemSizeKwp),
        "29.150,00 EUR*" => Key(AmortizationTime),
        "6,1 kWh" | "Verbrauch" => Key(StorageCapacityKwh),
        "8.251,92 kWh/Jahr" => Key(AnnualProductionKwh),
        "54%" => Key(SelfSupplyRatePercent),
        "42%" => Key(SelfConsumptionPercent),
        "Heizung" => Key(ModuleCountWithUnit),
        "Warmwasser" => Key(InverterTotalPowerKw),
        "Dachneigung" => Key(AnnualFeedInRevenueEur),
        "Solaranlage" => Key(VatAmountEur),
        "Batterie" | "Jahresertrag" => Label("inklusive"),
        "DC Dachmontage" => Label("DC Dachmontage"),
        "AC Installation und Inbetriebnahme" | "AC Installation | Inbetriebnahme" => {
            Label("AC Installation | Inbetriebnahme")
        }

        // Energy flows
        "8.251 kWh" => Key(AnnualProductionKwhShort),
        "1.945 kWh" => Key(DirectSelfConsumptionKwh),
        "1.562 kWh" => Key(BatteryChargeKwh),
        "1.313 kWh" | "1.321 kWh" => Key(BatteryDischargeForScKwh),
        "4.745 kWh" => Key(GridFeedInKwh),
        "2.742 kWh" => Key(GridDrawKwh),
        "6.000 kWh" => Key(AnnualConsumptionKwh),
        "Direkter Verbrauch (kWh)" => Key(ConsumptionDirectKwh),
        "Batteriespeicher (kWh)" => Key(ConsumptionBatteryKwh),
        "Netzbezug (kWh)" => Key(ConsumptionGridKwh),
        "Hinweis Batteriespeicher" => Key(BatteryNoteText),

        // Share labels. The template's direct and feed-in arrow labels are
        // swapped relative to their sample values.
        "58%" => Key(FeedInQuoteProdPercent),
        "19%" => Key(BatteryUseQuoteProdPercent),
        "24" => Key(DirectConsumptionQuoteProdNumber),
        "22%" => Key(BatteryCoverConsumptionPercent),
        "46%" => Key(GridConsumptionRatePercent),
        "32" => Key(DirectCoverConsumptionNumber),

        // Economics
        "36.958" => Key(SavingsWithBatteryNumber),
        "29.150" => Key(SavingsWithoutBatteryNumber),
        "12,7%" | "9,7%" => Key(IrrPercent),
        "8,9 Cent" | "13,5 Cent" => Key(LcoeCentPerKwh),

        // Components
        "Modul-Hersteller" => Key(ModuleManufacturer),
        "Modul-Modell" => Key(ModuleModel),
        "Modul-Leistung" => Key(ModulePowerWp),
        "Modul-Garantie" => Key(ModuleWarrantyYears),
        "Modul-Leistungsgarantie" => Key(ModulePerformanceWarranty),
        "WR-Hersteller" => Key(InverterManufacturer),
        "WR-Modell" => Key(InverterDisplayWithQty),
        "WR-Wirkungsgrad" => Key(InverterMaxEfficiencyPercent),
        "WR-Garantie" => Key(InverterWarrantyYears),
        "Speicher-Hersteller" => Key(StorageManufacturer),
        "Speicher-Modell" => Key(StorageModel),
        "Speicher-Kapazität" => Key(StorageCapacityKwh),
        "Speicher-Leistung" => Key(StoragePowerKw),
        "Speicher-Entladetiefe" => Key(StorageDodPercent),
        "Speicher-Zyklen" => Key(StorageCycles),

        _ => return None,
    };
    Some(binding)
}
