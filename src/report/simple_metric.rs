//! JSON skeleton of the "simple metric" summary written next to the
//! figures. The content blocks are produced by the measurement modules;
//! this only assembles the shared structure.

use serde_json::{json, Map, Value};

use crate::plots::ChannelKind;

/// Local (per-epoch) block of a simple metric. Omit it entirely when no
/// local metric is calculated; pass empty content with a note in the
/// description when it was expected but failed.
pub struct LocalMetric {
    pub name: String,
    pub description: String,
    pub content_mag: Value,
    pub content_grad: Value,
}

/// Basic structure of the simple metric for all measurements.
///
/// # Arguments
///
/// * `global_name` - name of the global metric.
/// * `global_description` - description of the global metric.
/// * `global_content_mag` - global content for the magnetometers.
/// * `global_content_grad` - global content for the gradiometers.
/// * `local` - optional local metric block.
/// * `psd` - whether the metric is computed on PSD data; switches the units.
/// * `measurement_units` - whether to include the measurement units.
pub fn simple_metric_basic(
    global_name: &str,
    global_description: &str,
    global_content_mag: Value,
    global_content_grad: Value,
    local: Option<LocalMetric>,
    psd: bool,
    measurement_units: bool,
) -> Value {
    let unit_of = |kind: ChannelKind| {
        if psd {
            kind.psd_unit()
        } else {
            kind.unit()
        }
    };

    let mut metric = Map::new();
    if measurement_units {
        metric.insert(
            "measurement_unit_mag".to_string(),
            json!(unit_of(ChannelKind::Magnetometers)),
        );
        metric.insert(
            "measurement_unit_grad".to_string(),
            json!(unit_of(ChannelKind::Gradiometers)),
        );
    }

    metric.insert(
        global_name.to_string(),
        json!({
            "description": global_description,
            "mag": global_content_mag,
            "grad": global_content_grad,
        }),
    );

    if let Some(local) = local {
        metric.insert(
            local.name,
            json!({
                "description": local.description,
                "mag": local.content_mag,
                "grad": local.content_grad,
            }),
        );
    }

    Value::Object(metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_only_metric_with_units() {
        let metric = simple_metric_basic(
            "STD_all_time_series",
            "Standard deviation over the whole recording",
            json!({"number_of_noisy_ch": 2}),
            json!({"number_of_noisy_ch": 0}),
            None,
            false,
            true,
        );
        assert_eq!(metric["measurement_unit_mag"], "Tesla");
        assert_eq!(metric["measurement_unit_grad"], "Tesla/meter");
        assert_eq!(
            metric["STD_all_time_series"]["mag"]["number_of_noisy_ch"],
            2
        );
        assert!(metric.get("STD_epochs").is_none());
    }

    #[test]
    fn psd_metric_switches_units() {
        let metric = simple_metric_basic(
            "PSD_global",
            "Relative band power",
            json!({}),
            json!({}),
            None,
            true,
            true,
        );
        assert_eq!(metric["measurement_unit_mag"], "T/Hz");
        assert_eq!(metric["measurement_unit_grad"], "T/m / Hz");
    }

    #[test]
    fn local_block_is_merged() {
        let metric = simple_metric_basic(
            "PTP_manual_all",
            "Peak-to-peak over the whole recording",
            json!({}),
            json!({}),
            Some(LocalMetric {
                name: "PTP_manual_epochs".to_string(),
                description: "Peak-to-peak per epoch".to_string(),
                content_mag: json!({"noisy_epochs": [1, 4]}),
                content_grad: json!({"noisy_epochs": []}),
            }),
            false,
            false,
        );
        assert!(metric.get("measurement_unit_mag").is_none());
        assert_eq!(metric["PTP_manual_epochs"]["mag"]["noisy_epochs"][1], 4);
    }
}
