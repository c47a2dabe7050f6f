/*!
# bynom
- provides transactional parser combinators over bytes
- grammars are built once, as a tree of small noms, and run many times
- a failed parse reports where it failed, what it was doing, and the bytes it ran over


Main concepts:

# Plate
the byte source a grammar reads from. It has a cursor which noms move forwards (reading) and
backwards (backtracking). [`BytePlate`](crate::plate::BytePlate) wraps a borrowed or owned buffer.

# Nom
a single parsing operation over a plate. Primitive noms read literal bytes or runs of bytes
matching a predicate; flow noms combine other noms into sequences, alternatives, optional and
repeated parts.

```
use bynom::prelude::*;

let greeting = seq(expect(b'h')).then(expect(b'i')).then(blank()).then(expect(b'!'));
let mut plate = BytePlate::from("hi !");
greeting.eat(&Context::background(), &mut plate).unwrap();
assert_eq!(plate.position(), 4);
```

# Rule
the entry point of a grammar. A rule either consumes the piece it describes, or leaves the
cursor where it was and returns a [`DiagnosticError`](crate::diagnostics::DiagnosticError).


# Testing

For more substantial tests during development of your grammars, using a logging framework for
test-harnesses is encouraged

```toml
[dev-dependencies]
env_logger = "0.10"
test-log = {version = "0.2"}
```

This will allow every nom to be traced with
```sh
RUST_LOG=bynom=trace cargo test mytest -- --nocapture
```

*/

pub mod ch_1_getting_started;
pub mod ch_2_capture;
pub mod ch_3_alternatives;
pub mod ch_4_state_bits;
pub mod ch_5_enum_strum;
pub mod ch_6_diagnostics;
