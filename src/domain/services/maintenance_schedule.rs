use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{
    ItemDue, MaintenanceDueReport, MaintenanceLabel, MaintenanceStatus, ReplacementItem, Vehicle,
};

/// Share of the interval, in tenths, that opens the warning window before an
/// item falls due.
const WARNING_WINDOW_TENTHS: i64 = 1;

/// Classifies one item against a reference odometer reading.
///
/// `due` once `reference_km` reaches `last_change_km + replace_every_km`,
/// `warning` within the last tenth of the interval, `ok` otherwise.
pub fn evaluate_item(item: &ReplacementItem, reference_km: i64) -> MaintenanceStatus {
    // i128: ten times any stored reading still fits.
    let reference_km = i128::from(reference_km);
    let next_change_km = i128::from(item.next_change_km());
    let window = i128::from(WARNING_WINDOW_TENTHS) * i128::from(item.replace_every_km());

    if reference_km >= next_change_km {
        MaintenanceStatus::Due
    } else if 10 * reference_km >= 10 * next_change_km - window {
        MaintenanceStatus::Warning
    } else {
        MaintenanceStatus::Ok
    }
}

/// Builds the due report for a vehicle from all of its labels.
///
/// When several labels track an item with the same name, only the most
/// recent change is evaluated: the largest `last_change_km`, ties going to
/// the later service (`performed_on`, then `created_at`). On a full tie the
/// label listed first wins; repositories list newest first.
pub fn build_due_report(
    vehicle: &Vehicle,
    labels: &[MaintenanceLabel],
    reference_km: i64,
) -> MaintenanceDueReport {
    let mut latest: HashMap<String, (&ReplacementItem, &MaintenanceLabel)> = HashMap::new();

    for label in labels {
        for item in label.items() {
            let key = item.name().trim().to_lowercase();
            let replace = match latest.get(&key) {
                None => true,
                Some((current, current_label)) => {
                    item.last_change_km() > current.last_change_km()
                        || (item.last_change_km() == current.last_change_km()
                            && service_order(label) > service_order(current_label))
                }
            };
            if replace {
                latest.insert(key, (item, label));
            }
        }
    }

    let mut items: Vec<ItemDue> = latest
        .into_values()
        .map(|(item, label)| {
            let next_change_km = item.next_change_km();
            ItemDue {
                name: item.name().to_string(),
                label_id: label.id().to_string(),
                last_change_km: item.last_change_km(),
                replace_every_km: item.replace_every_km(),
                next_change_km,
                km_remaining: next_change_km.saturating_sub(reference_km),
                status: evaluate_item(item, reference_km),
            }
        })
        .collect();

    items.sort_by(|a, b| {
        a.status
            .cmp(&b.status)
            .then(a.km_remaining.cmp(&b.km_remaining))
            .then_with(|| a.name.cmp(&b.name))
    });

    let count = |status: MaintenanceStatus| items.iter().filter(|i| i.status == status).count();
    let due_count = count(MaintenanceStatus::Due);
    let warning_count = count(MaintenanceStatus::Warning);
    let ok_count = count(MaintenanceStatus::Ok);

    MaintenanceDueReport {
        vehicle_id: vehicle.id().to_string(),
        plate: vehicle.plate().to_string(),
        reference_km,
        items,
        due_count,
        warning_count,
        ok_count,
    }
}

fn service_order(label: &MaintenanceLabel) -> (NaiveDate, i64) {
    (label.performed_on(), label.created_at())
}
