use std::io::Write;

use super::Clause;
use super::EncodingMode;
use super::PedCnf;

impl PedCnf {
    /// Writes the instance in DIMACS CNF format.
    ///
    /// Every note becomes a comment line. The variables are listed with their names in comment
    /// lines before the problem line. In extended mode the XOR-clauses follow the plain clauses,
    /// each prefixed by `x`, and are included in the clause count.
    pub fn write_dimacs(&self, out: &mut impl Write, notes: &[String]) -> std::io::Result<()> {
        for note in notes {
            writeln!(out, "c {note}")?;
        }
        if self.mode() == EncodingMode::Extended {
            writeln!(out, "c extended syntax: or- and xor-clauses")?;
        }
        writeln!(out, "c")?;
        for (index, variable) in self.variables() {
            writeln!(out, "c v {index:>5} {variable}")?;
        }
        writeln!(out, "c")?;
        writeln!(out, "p cnf {} {}", self.num_variables(), self.clause_count())?;

        for clause in self.clauses() {
            write_clause(out, clause)?;
        }
        for clause in self.xor_clauses() {
            write!(out, "x")?;
            write_clause(out, clause)?;
        }

        Ok(())
    }
}

fn write_clause(out: &mut impl Write, clause: &Clause) -> std::io::Result<()> {
    for literal in clause {
        write!(out, "{literal:>6} ")?;
    }
    writeln!(out, "     0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;
    use crate::pedigree::IndividualId;

    fn render(cnf: &PedCnf, notes: &[String]) -> String {
        let mut buffer = Vec::new();
        cnf.write_dimacs(&mut buffer, notes).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn plain_instance_is_written() {
        let mut cnf = PedCnf::default();
        let h = cnf.get_h(IndividualId::create_from_index(0), 1) as i32;
        let s = cnf.get_s(
            IndividualId::create_from_index(0),
            IndividualId::create_from_index(1),
        ) as i32;
        let _ = cnf.add_clause(Clause::from([h, -s]));
        let _ = cnf.add_clause(Clause::from([-h]));

        let text = render(&cnf, &["note".to_owned()]);

        assert_eq!(
            text,
            "c note\n\
             c\n\
             c v     1 h_0_1\n\
             c v     2 s_0_1\n\
             c\n\
             p cnf 2 2\n    \
             -2      1      0\n    \
             -1      0\n"
        );
    }

    #[test]
    fn extended_instance_lists_xor_clauses_last() {
        let mut cnf = PedCnf::new(EncodingMode::Extended);
        let a = cnf.get_h(IndividualId::create_from_index(0), 0) as i32;
        let b = cnf.get_h(IndividualId::create_from_index(1), 0) as i32;
        let _ = cnf.add_clause(Clause::from([a]));
        let _ = cnf.add_xor_clause(Clause::from([-a, b]));

        let text = render(&cnf, &[]);

        assert_eq!(
            text,
            "c extended syntax: or- and xor-clauses\n\
             c\n\
             c v     1 h_0_0\n\
             c v     2 h_1_0\n\
             c\n\
             p cnf 2 2\n     \
             1      0\n\
             x    -1      2      0\n"
        );
    }

    #[test]
    fn writing_does_not_allocate_variables() {
        let mut cnf = PedCnf::default();
        let _ = cnf.get_h(IndividualId::create_from_index(0), 0);

        let _ = render(&cnf, &[]);

        assert_eq!(cnf.num_variables(), 1);
    }
}
