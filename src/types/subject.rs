use super::{AcademicGroupCode, AcademicGroupKind, SubjectCode, TimeRange, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lab-specific configuration for one academic group within a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabConfig {
    #[serde(default, rename = "horas_por_sesion")]
    pub hours_per_session: f64,
    #[serde(default, rename = "minutos_por_sesion")]
    pub minutes_per_session: f64,
    #[serde(default, rename = "grupos_previstos")]
    pub planned_group_count: u32,
    #[serde(default, rename = "clases_año")]
    pub sessions_per_semester: u32,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            hours_per_session: 0.0,
            minutes_per_session: 0.0,
            planned_group_count: 0,
            sessions_per_semester: 1,
        }
    }
}

/// One academic group's association to a subject, carrying its lab
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssociatedGroup {
    #[serde(default, rename = "configuracion_laboratorio")]
    pub lab_config: LabConfig,
}

/// `configuracion.asignaturas.datos[subject_code]`: the subject's name
/// and its associated academic groups (lab configuration only — the
/// weekly grid lives separately, under `horarios`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsignaturaEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "grupos_asociados")]
    pub associated_groups: BTreeMap<AcademicGroupCode, AssociatedGroup>,
}

impl AsignaturaEntry {
    /// The subject's required simple and optional dual academic-group
    /// codes, classified by pattern (§3: "exactly one simple code is
    /// required; dual code is optional").
    pub fn simple_and_dual_codes(&self) -> (Option<AcademicGroupCode>, Option<AcademicGroupCode>) {
        let mut simple = None;
        let mut dual = None;
        for code in self.associated_groups.keys() {
            match AcademicGroupKind::classify(&code.0) {
                Some(AcademicGroupKind::Simple) => simple = Some(code.clone()),
                Some(AcademicGroupKind::Dual) => dual = Some(code.clone()),
                None => {}
            }
        }
        (simple, dual)
    }

    pub fn planned_group_count(&self, code: &AcademicGroupCode) -> u32 {
        self.associated_groups
            .get(code)
            .map(|g| g.lab_config.planned_group_count)
            .unwrap_or(0)
    }

    pub fn sessions_per_group(&self, code: &AcademicGroupCode) -> u32 {
        self.associated_groups
            .get(code)
            .map(|g| g.lab_config.sessions_per_semester.max(1))
            .unwrap_or(1)
    }
}

/// One cell of the weekly schedule grid: the academic-group codes
/// that meet in this (time-range, weekday) slot, and whether the cell
/// mixes simple and dual codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridCell {
    #[serde(default)]
    pub groups: Vec<AcademicGroupCode>,
    #[serde(default, rename = "mixta")]
    pub mixed: bool,
}

/// A subject's weekly schedule grid: time-range -> weekday -> cell.
pub type ScheduleGrid = BTreeMap<String, BTreeMap<String, GridCell>>;

/// `configuracion.horarios.datos[semester][subject_code]`: the weekly
/// schedule grid for one subject within one semester.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorarioEntry {
    #[serde(default, rename = "horarios_grid")]
    pub grid: ScheduleGrid,
}

impl HorarioEntry {
    /// All (weekday, time-range) slots in which `group` appears in
    /// the grid, sorted by (weekday-ordinal, time-range-start-minute)
    /// and deduplicated.
    pub fn slots_for_group(&self, group: &AcademicGroupCode) -> Vec<(Weekday, TimeRange)> {
        let mut out: Vec<(Weekday, TimeRange)> = Vec::new();
        for (range_key, days) in &self.grid {
            let range = TimeRange(crate::normalizer::normalize_time_range(range_key));
            for (day_key, cell) in days {
                let Some(day) = Weekday::parse(day_key) else {
                    continue;
                };
                if cell.groups.contains(group) {
                    let entry = (day, range.clone());
                    if !out.contains(&entry) {
                        out.push(entry);
                    }
                }
            }
        }
        out.sort_by_key(|(day, range)| (day.ordinal(), range.start_minutes(), range.0.clone()));
        out
    }

    /// Whether the grid cell for `(day, range)` is marked mixed.
    pub fn is_mixed_slot(&self, day: Weekday, range: &TimeRange) -> bool {
        for (range_key, days) in &self.grid {
            if crate::normalizer::normalize_time_range(range_key) != range.0 {
                continue;
            }
            for (day_key, cell) in days {
                if Weekday::parse(day_key) == Some(day) {
                    return cell.mixed;
                }
            }
        }
        false
    }
}

/// Normalizes every cell of a schedule grid in place: bare lists
/// become `{groups, mixed}` objects, `mixed` is recomputed, and
/// legacy boolean-keyed cells are unpacked (§4.1 `normalize-grid`).
/// Operates on the raw `serde_json::Value` form of the document
/// before typed deserialization, since that is the only place the
/// three legacy shapes can still be told apart.
pub fn normalize_grid_value(grid: &mut serde_json::Value) {
    use serde_json::Value;
    let Value::Object(ranges) = grid else {
        return;
    };
    for (_range, days) in ranges.iter_mut() {
        let Value::Object(days) = days else {
            continue;
        };
        for (_day, cell) in days.iter_mut() {
            match cell {
                Value::Array(list) => {
                    let codes: Vec<String> = list
                        .iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect();
                    let mixed = compute_mixed_strs(&codes);
                    *cell = serde_json::json!({ "groups": codes, "mixta": mixed });
                }
                Value::Object(obj) => {
                    if let Some(Value::Array(groups)) = obj.get("groups").cloned() {
                        let codes: Vec<String> = groups
                            .iter()
                            .filter_map(|v| v.as_str().map(|s| s.to_string()))
                            .collect();
                        let mixed = compute_mixed_strs(&codes);
                        obj.insert("mixta".to_string(), serde_json::json!(mixed));
                    } else {
                        let mut bool_keys: Vec<String> = obj
                            .iter()
                            .filter(|(_, v)| v.is_boolean())
                            .map(|(k, _)| k.clone())
                            .collect();
                        bool_keys.sort();
                        if !bool_keys.is_empty() {
                            let mixed = compute_mixed_strs(&bool_keys);
                            obj.insert("groups".to_string(), serde_json::json!(bool_keys));
                            obj.insert("mixta".to_string(), serde_json::json!(mixed));
                        } else {
                            obj.entry("groups").or_insert_with(|| serde_json::json!([]));
                            obj.entry("mixta").or_insert_with(|| serde_json::json!(false));
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn compute_mixed_strs(codes: &[String]) -> bool {
    let has_simple = codes
        .iter()
        .any(|c| AcademicGroupKind::classify(c) == Some(AcademicGroupKind::Simple));
    let has_dual = codes
        .iter()
        .any(|c| AcademicGroupKind::classify(c) == Some(AcademicGroupKind::Dual));
    has_simple && has_dual
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_bare_list_cell() {
        let mut grid = serde_json::json!({
            "09:30-11:30": { "Lunes": ["A404", "EE403"] }
        });
        normalize_grid_value(&mut grid);
        assert_eq!(grid["09:30-11:30"]["Lunes"]["mixta"], true);
        assert_eq!(
            grid["09:30-11:30"]["Lunes"]["groups"],
            serde_json::json!(["A404", "EE403"])
        );
    }

    #[test]
    fn recomputes_mixed_on_object_with_groups() {
        let mut grid = serde_json::json!({
            "09:30-11:30": { "Lunes": { "groups": ["A404"], "mixta": true } }
        });
        normalize_grid_value(&mut grid);
        assert_eq!(grid["09:30-11:30"]["Lunes"]["mixta"], false);
    }

    #[test]
    fn unpacks_legacy_boolean_keyed_cell() {
        let mut grid = serde_json::json!({
            "09:30-11:30": { "Lunes": { "A404": true, "EE403": true, "mixta": false } }
        });
        normalize_grid_value(&mut grid);
        assert_eq!(grid["09:30-11:30"]["Lunes"]["mixta"], true);
        assert_eq!(
            grid["09:30-11:30"]["Lunes"]["groups"],
            serde_json::json!(["A404", "EE403"])
        );
    }
}
