//! Plain-text household report.

use std::fmt;

use crate::sim::aggregate::MultiDeviceState;
use crate::sim::types::Scenario;

impl fmt::Display for MultiDeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Cost Comparison ---")?;
        for scenario in Scenario::ALL {
            let costs = self.scenario(scenario);
            writeln!(
                f,
                "{:<24} {:>10.2}/day {:>12.2}/month {:>14.2}/year",
                scenario.to_string(),
                costs.total.daily,
                costs.total.monthly,
                costs.total.annual
            )?;
        }
        writeln!(
            f,
            "Savings vs baseline:     {:.2}/month ({:.2}/year)",
            self.savings.monthly_vs_baseline, self.savings.annual_vs_baseline
        )?;
        writeln!(
            f,
            "Savings vs current:      {:.2}/month ({:.2}/year)",
            self.savings.monthly_vs_current, self.savings.annual_vs_current
        )?;
        writeln!(
            f,
            "Profile daily savings:   {:.2}",
            self.savings.daily_profile
        )?;

        writeln!(f, "\n--- Devices ---")?;
        for d in &self.devices {
            let current = self
                .current
                .by_device
                .get(&d.instance_id)
                .map_or(0.0, |c| c.monthly);
            let optimized = self
                .optimized
                .by_device
                .get(&d.instance_id)
                .map_or(0.0, |c| c.monthly);
            write!(
                f,
                "{:<20} {:>7.0} W {:>5.1} h  {:>10.2} -> {:>10.2}/month  hours {:?} -> {:?}",
                d.name, d.watts, d.duration_hours, current, optimized, d.selected_hours, d.optimized_hours
            )?;
            if let (Some(now), Some(best)) = (d.current_cost_per_meal, d.optimized_cost_per_meal) {
                write!(f, "  per meal {now:.2} -> {best:.2}")?;
            }
            writeln!(f)?;
        }

        let g = &self.grid;
        writeln!(f, "\n--- Grid Impact ---")?;
        writeln!(f, "Daily energy:            {:.2} kWh", g.total_kwh)?;
        writeln!(
            f,
            "Band energy:             peak {:.2} / mid {:.2} / off {:.2} kWh",
            g.metrics.band_energy.peak, g.metrics.band_energy.midpeak, g.metrics.band_energy.offpeak
        )?;
        writeln!(f, "Off-peak share:          {:.1}%", g.metrics.off_peak_pct())?;
        writeln!(f, "Load factor:             {:.1}%", g.metrics.load_factor)?;
        writeln!(
            f,
            "Stress score:            {:.2} (optimized {:.2})",
            g.metrics.stress_score, self.optimized_grid.stress_score
        )?;
        writeln!(
            f,
            "Efficiency score:        {:.1}/10 (optimized {:.1}/10)",
            g.metrics.efficiency_score, self.optimized_grid.efficiency_score
        )?;
        match g.peak_load_hour {
            Some(hour) => writeln!(f, "Peak load hour:          {hour:02}:00")?,
            None => writeln!(f, "Peak load hour:          none")?,
        }

        let e = &self.emissions;
        writeln!(f, "\n--- Emissions (monthly) ---")?;
        writeln!(f, "Electric:                {:.1} kg CO2e", e.current)?;
        writeln!(f, "Baseline:                {:.1} kg CO2e", e.baseline)?;
        writeln!(f, "Saved:                   {:.1} kg CO2e", e.saved)?;
        write!(f, "Tree equivalent:         {:.1} trees", e.trees_equivalent)
    }
}
