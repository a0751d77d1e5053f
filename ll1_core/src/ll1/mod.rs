mod symbol;
pub use self::symbol::{Symbol, END_MARKER, EPSILON};

mod production;
pub use self::production::Production;

mod rule;
pub use self::rule::Rule;

mod grammar;
pub use self::grammar::Grammar;

mod read;
pub use self::read::{parse, GrammarReader, ReadGrammar};

mod left_factor;
pub use self::left_factor::{has_common_prefix, left_factor};

mod left_recursion;
pub use self::left_recursion::{eliminate_left_recursion, is_left_recursive};

mod first_follow;
pub use self::first_follow::{FirstSets, FollowSets};

mod parse_table;
pub use self::parse_table::ParseTable;

mod analysis;
pub use self::analysis::{Analysis, AnalysisOptions};
