// Rules are separated by NEWRULE; AND binds tighter than OR.

use crate::reader::ByteCursor;

pub const EQ: u8 = 0x01;
pub const LT: u8 = 0x02;
pub const LEQ: u8 = 0x03;
pub const BETWEEN: u8 = 0x04;
pub const NOT: u8 = 0x08;
pub const MOD_10: u8 = 0x10;
pub const MOD_100: u8 = 0x20;
pub const LEAD_1000: u8 = 0x40;
pub const AND: u8 = 0xFD;
pub const OR: u8 = 0xFE;
pub const NEWRULE: u8 = 0xFF;

const OP_MASK: u8 = 0x07;
const RESERVED: u8 = 0x80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operator {
    Eq,
    Lt,
    Leq,
    Between,
}

impl Operator {
    fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode & OP_MASK {
            EQ => Some(Self::Eq),
            LT => Some(Self::Lt),
            LEQ => Some(Self::Leq),
            BETWEEN => Some(Self::Between),
            _ => None,
        }
    }

    fn operand_count(self) -> usize {
        match self {
            Self::Between => 2,
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Modifier {
    None,
    Mod10,
    Mod100,
    Lead1000,
}

impl Modifier {
    fn from_opcode(opcode: u8) -> Self {
        if opcode & MOD_10 != 0 {
            Self::Mod10
        } else if opcode & MOD_100 != 0 {
            Self::Mod100
        } else if opcode & LEAD_1000 != 0 {
            Self::Lead1000
        } else {
            Self::None
        }
    }

    fn apply(self, n: i64) -> i64 {
        match self {
            Self::None => n,
            Self::Mod10 => n % 10,
            Self::Mod100 => n % 100,
            Self::Lead1000 => {
                let mut value = n;
                while value >= 1000 {
                    value /= 1000;
                }
                value
            }
        }
    }
}

pub fn validate(rules: &[u8]) -> bool {
    form_count(rules).is_some()
}

/// Number of plural forms the bytecode distinguishes: one per rule plus the
/// trailing "else" form. `None` if the bytecode is malformed.
pub fn form_count(rules: &[u8]) -> Option<u32> {
    if rules.is_empty() {
        return Some(1);
    }
    let mut cursor = ByteCursor::new(rules);
    let mut forms = 2u32;
    loop {
        let opcode = cursor.read_u8()?;
        if opcode & RESERVED != 0 {
            return None;
        }
        let operator = Operator::from_opcode(opcode)?;
        cursor.skip(operator.operand_count())?;
        match cursor.read_u8() {
            None => return Some(forms),
            Some(AND) | Some(OR) => {}
            Some(NEWRULE) => forms = forms.saturating_add(1),
            Some(_) => return None,
        }
        if cursor.is_at_end() {
            return None;
        }
    }
}

/// A malformed tail stops evaluation at the rule reached so far.
pub fn evaluate(rules: &[u8], n: i64) -> u32 {
    if rules.is_empty() {
        return 0;
    }
    let mut cursor = ByteCursor::new(rules);
    let mut result = 0u32;
    loop {
        let mut rule_holds = false;
        loop {
            let mut group_holds = true;
            loop {
                let Some(truth) = evaluate_instruction(&mut cursor, n) else {
                    return result;
                };
                group_holds = group_holds && truth;
                if cursor.peek_u8() != Some(AND) {
                    break;
                }
                cursor.skip(1);
            }
            rule_holds = rule_holds || group_holds;
            if cursor.peek_u8() != Some(OR) {
                break;
            }
            cursor.skip(1);
        }
        if rule_holds {
            return result;
        }
        result += 1;
        if cursor.read_u8().is_none() {
            return result;
        }
    }
}

fn evaluate_instruction(cursor: &mut ByteCursor<'_>, n: i64) -> Option<bool> {
    let opcode = cursor.read_u8()?;
    let operator = Operator::from_opcode(opcode)?;
    let left = Modifier::from_opcode(opcode).apply(n);
    let right = i64::from(cursor.read_u8()?);
    let truth = match operator {
        Operator::Eq => left == right,
        Operator::Lt => left < right,
        Operator::Leq => left <= right,
        Operator::Between => {
            let top = i64::from(cursor.read_u8()?);
            left >= right && left <= top
        }
    };
    Some(if opcode & NOT != 0 { !truth } else { truth })
}
