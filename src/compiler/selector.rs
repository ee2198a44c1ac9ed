use smallvec::SmallVec;

type Names<'a> = SmallVec<[&'a str; 4]>;

/// Selector split at its first relative marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector<'a> {
    pub absolute: Names<'a>,
    pub relative: Option<Names<'a>>,
}

impl Selector<'_> {
    pub fn is_empty(&self) -> bool {
        self.absolute.is_empty() && self.relative.is_none()
    }
}

pub fn split_selector(selector: &str, marker: char) -> Selector<'_> {
    let mut absolute = Names::new();
    let mut relative: Option<Names<'_>> = None;

    for name in selector.split('/').filter(|name| !name.is_empty()) {
        match relative.as_mut() {
            Some(names) => names.push(name),
            None => match name.strip_prefix(marker) {
                Some(stripped) => {
                    let mut names = Names::new();
                    if !stripped.is_empty() {
                        names.push(stripped);
                    }
                    relative = Some(names);
                }
                None => absolute.push(name),
            },
        }
    }

    Selector { absolute, relative }
}
