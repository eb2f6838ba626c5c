//! Summary reporting (§6 CLI contract): colored terminal output for
//! a planning run's group count, conflicts, and advisories.

use crate::types::ResultadosOrganizacion;
use colored::Colorize;

/// Counts pulled out of a result document for the `[OK]` summary line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunCounts {
    pub groups: usize,
    pub advisories: usize,
    pub teacher_conflicts: usize,
    pub room_conflicts: usize,
}

impl RunCounts {
    pub fn from_resultados(resultados: &ResultadosOrganizacion) -> Self {
        let groups = resultados
            .semestre_1
            .values()
            .chain(resultados.semestre_2.values())
            .map(|a| a.grupos.len())
            .sum();
        Self {
            groups,
            advisories: resultados.avisos.len(),
            teacher_conflicts: resultados.conflictos.profesores.len(),
            room_conflicts: resultados.conflictos.aulas.len(),
        }
    }
}

/// Prints the `[OK]`-prefixed summary line plus advisory/conflict
/// counts to stdout (§6 CLI contract, verbatim).
pub fn print_summary(resultados: &ResultadosOrganizacion) {
    let counts = RunCounts::from_resultados(resultados);
    println!(
        "{} planning run complete — {} lab groups scheduled",
        "[OK]".green().bold(),
        counts.groups
    );
    println!(
        "     Conflictos -> Profesores: {} | Aulas: {}",
        counts.teacher_conflicts, counts.room_conflicts
    );
    println!("     Avisos: {}", counts.advisories);
    if counts.advisories > 0 {
        for aviso in &resultados.avisos {
            println!("     - {}", aviso.yellow());
        }
    }
}
