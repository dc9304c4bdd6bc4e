use arch::Isa;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Predefined,
    Label,
    Variable,
}

/// Symbol table of one assembly run.
#[derive(Debug, Clone)]
pub struct Symbols {
    table: IndexMap<String, (Kind, u32)>,
    next_var: u32,
}

impl Symbols {
    pub fn new(isa: &Isa) -> Self {
        Symbols {
            table: isa
                .symbols
                .iter()
                .map(|(name, addr)| (name.clone(), (Kind::Predefined, *addr)))
                .collect(),
            next_var: isa.var_base,
        }
    }

    /// Bind `name` to instruction index `pc`. The first binding of a name
    /// wins; later ones are ignored and return `false`.
    pub fn bind_label(&mut self, name: &str, pc: u32) -> bool {
        if self.table.contains_key(name) {
            return false;
        }
        self.table.insert(name.to_string(), (Kind::Label, pc));
        true
    }

    /// Address of `name`. A name seen for the first time takes the next free
    /// variable address.
    pub fn resolve(&mut self, name: &str) -> u32 {
        if let Some((_, addr)) = self.table.get(name) {
            return *addr;
        }
        let addr = self.next_var;
        self.table.insert(name.to_string(), (Kind::Variable, addr));
        self.next_var += 1;
        addr
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.table.get(name).map(|(_, addr)| *addr)
    }

    pub fn kind(&self, name: &str) -> Option<Kind> {
        self.table.get(name).map(|(kind, _)| *kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Kind, u32)> {
        self.table
            .iter()
            .map(|(name, (kind, addr))| (name.as_str(), *kind, *addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::HACK;

    #[test]
    fn seeded_with_predefined() {
        let symbols = Symbols::new(&HACK);
        assert_eq!(symbols.get("ARG"), Some(2));
        assert_eq!(symbols.kind("SCREEN"), Some(Kind::Predefined));
        assert_eq!(symbols.get("LOOP"), None);
    }

    #[test]
    fn first_label_wins() {
        let mut symbols = Symbols::new(&HACK);
        assert!(symbols.bind_label("LOOP", 4));
        assert!(!symbols.bind_label("LOOP", 9));
        assert_eq!(symbols.get("LOOP"), Some(4));
    }

    #[test]
    fn label_cannot_shadow_predefined() {
        let mut symbols = Symbols::new(&HACK);
        assert!(!symbols.bind_label("SP", 7));
        assert_eq!(symbols.get("SP"), Some(0));
    }

    #[test]
    fn variables_in_first_use_order() {
        let mut symbols = Symbols::new(&HACK);
        assert_eq!(symbols.resolve("x"), 16);
        assert_eq!(symbols.resolve("y"), 17);
        assert_eq!(symbols.resolve("x"), 16);
        assert_eq!(symbols.resolve("R2"), 2);
        assert_eq!(symbols.resolve("z"), 18);
        assert_eq!(symbols.kind("y"), Some(Kind::Variable));
    }
}
