/// Annual energy figures as reported by the simulation, before any
/// consistency correction. All values in kWh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawEnergyFlows {
    pub production: Option<f64>,
    pub consumption: Option<f64>,
    pub direct_self_consumption: f64,
    pub battery_charge: f64,
    pub battery_discharge_for_sc: f64,
    /// Only used when production is unknown.
    pub feed_in: Option<f64>,
    /// Only used when consumption is unknown.
    pub grid_draw: Option<f64>,
}

/// Energy flows that satisfy the conservation rules:
///
/// - `direct_self_consumption <= min(production, consumption)`
/// - `battery_charge <= production - direct_self_consumption`
/// - `battery_discharge_for_sc <= min(battery_charge, consumption - direct_self_consumption)`
/// - `feed_in = max(0, production - direct - charge)`
/// - `grid_draw = max(0, consumption - direct - discharge)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyFlowQuantities {
    pub production: Option<f64>,
    pub consumption: Option<f64>,
    pub direct_self_consumption: f64,
    pub battery_charge: f64,
    pub battery_discharge_for_sc: f64,
    pub feed_in: Option<f64>,
    pub grid_draw: Option<f64>,
}

impl RawEnergyFlows {
    pub fn reconcile(&self) -> EnergyFlowQuantities {
        let production = self.production.map(non_negative);
        let consumption = self.consumption.map(non_negative);
        let mut direct = non_negative(self.direct_self_consumption);
        let mut charge = non_negative(self.battery_charge);
        let mut discharge = non_negative(self.battery_discharge_for_sc);

        if let Some(p) = production {
            direct = direct.min(p);
        }
        if let Some(c) = consumption {
            direct = direct.min(c);
        }
        if let Some(p) = production {
            charge = charge.min(non_negative(p - direct));
        }
        if let Some(c) = consumption {
            discharge = discharge.min(non_negative(c - direct));
        }
        discharge = discharge.min(charge);

        let feed_in = match production {
            Some(p) => Some(non_negative(p - direct - charge)),
            None => self.feed_in.map(non_negative),
        };
        let grid_draw = match consumption {
            Some(c) => Some(non_negative(c - direct - discharge)),
            None => self.grid_draw.map(non_negative),
        };

        EnergyFlowQuantities {
            production,
            consumption,
            direct_self_consumption: direct,
            battery_charge: charge,
            battery_discharge_for_sc: discharge,
            feed_in,
            grid_draw,
        }
    }
}

impl EnergyFlowQuantities {
    /// Direct use, battery charge and feed-in as percentages of production.
    pub fn production_shares(&self) -> Option<[f64; 3]> {
        let p = self.production.filter(|p| *p > 0.0)?;
        let direct = self.direct_self_consumption.min(p);
        let charge = self.battery_charge.min(non_negative(p - direct));
        let feed_in = non_negative(p - direct - charge);
        Some([direct, charge, feed_in].map(|v| 100.0 * v / p))
    }

    /// Direct cover, battery cover and grid draw as percentages of
    /// consumption.
    pub fn consumption_shares(&self) -> Option<[f64; 3]> {
        let c = self.consumption.filter(|c| *c > 0.0)?;
        let grid = self.grid_draw.unwrap_or(0.0);
        Some(
            [self.direct_self_consumption, self.battery_discharge_for_sc, grid]
                .map(|v| 100.0 * v.min(c) / c),
        )
    }
}

fn non_negative(value: f64) -> f64 {
    // f64::max drops NaN.
    value.max(0.0)
}
