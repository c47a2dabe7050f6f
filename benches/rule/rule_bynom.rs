use std::cell::RefCell;

use bynom::prelude::*;

/// `{name} = value` or `[name] = value`
pub fn assignment<'g>(name: &'g RefCell<String>, value: &'g RefCell<String>) -> Rule<'g> {
    let bracketed = move |open, close| {
        when(expect(open))
            .then(take(into::string(name), while_not(close)))
            .then(expect(close))
    };
    Rule::new()
        .named("Assignment")
        .then(blank())
        .then(switch(bracketed(b'[', b']')).or(bracketed(b'{', b'}')))
        .then(blank())
        .then(expect(b'='))
        .then(blank())
        .then(take(into::string(value), any()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment() {
        let name = RefCell::new(String::new());
        let value = RefCell::new(String::new());
        assignment(&name, &value)
            .eat(&Context::background(), &mut BytePlate::from(crate::INPUT))
            .unwrap();
        assert_eq!(*name.borrow(), "NameHere");
        assert_eq!(*value.borrow(), "some longer VALUE with spaces");
    }
}
