//! Reader for `.frame` structural model files.
//!
//! A frame file is a whitespace-separated sequence of sections, each opened by
//! a `<command> <count>` header followed by `count` rows:
//!
//! ```text
//! nodes 3
//! 0  0.0  0.0 0.0
//! 1 -1.0  0.0 0.0
//! 2  0.0 -1.0 0.0
//! elements 2
//! 0 1 200.0 80.0 0.05
//! 0 2 200.0 80.0 0.05
//! boundary_conditions 2
//! 1 0.0 0.0 0.0 displacement
//! 0 700.0 0.0 0.0 force
//! ```
//!
//! Moduli are in GPa and radii in meters. The reader only checks structure;
//! it does not interpret the model.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, RunnerError};

/// A point or vector in 3D space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A frame joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index as written in the file.
    pub id: usize,
    pub pos: Vec3,
}

/// A beam connecting two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub node1: usize,
    pub node2: usize,
    /// GPa
    pub elastic_modulus: f32,
    /// GPa
    pub shear_modulus: f32,
    /// meters
    pub radius: f32,
    /// Source line, 0 when built in code.
    pub line: usize,
}

/// The node property a boundary condition fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    Force,
    Moment,
    Displacement,
    Rotation,
    Joint,
}

impl FromStr for BoundaryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "force" => Ok(Self::Force),
            "moment" => Ok(Self::Moment),
            "displacement" => Ok(Self::Displacement),
            "rotation" => Ok(Self::Rotation),
            "joint" => Ok(Self::Joint),
            other => Err(format!("unknown boundary condition type: {}", other)),
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Force => "force",
            Self::Moment => "moment",
            Self::Displacement => "displacement",
            Self::Rotation => "rotation",
            Self::Joint => "joint",
        };
        f.write_str(name)
    }
}

/// A fixed value applied to one node.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCondition {
    pub node: usize,
    pub kind: BoundaryKind,
    pub value: Vec3,
    /// Source line, 0 when built in code.
    pub line: usize,
}

/// A structural frame model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub nodes: Vec<Node>,
    pub elements: Vec<Element>,
    pub boundary_conditions: Vec<BoundaryCondition>,
}

impl Frame {
    /// Read and parse a frame file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RunnerError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse frame file contents.
    pub fn parse(content: &str) -> Result<Self> {
        let mut tokens = Tokens::new(content);
        let mut frame = Frame::default();

        while let Some((line, command)) = tokens.advance() {
            let count = tokens.index(&format!("{} count", command))?;
            match command {
                "nodes" => {
                    frame.nodes = (0..count)
                        .map(|_| -> Result<Node> {
                            Ok(Node {
                                id: tokens.index("node index")?,
                                pos: tokens.vec3("node position")?,
                            })
                        })
                        .collect::<Result<_>>()?;
                }
                "elements" => {
                    frame.elements = (0..count)
                        .map(|_| -> Result<Element> {
                            let node1 = tokens.index("element start node")?;
                            let line = tokens.line;
                            Ok(Element {
                                node1,
                                node2: tokens.index("element end node")?,
                                elastic_modulus: tokens.parse("elastic modulus")?,
                                shear_modulus: tokens.parse("shear modulus")?,
                                radius: tokens.parse("radius")?,
                                line,
                            })
                        })
                        .collect::<Result<_>>()?;
                }
                "boundary_conditions" => {
                    frame.boundary_conditions = (0..count)
                        .map(|_| -> Result<BoundaryCondition> {
                            let node = tokens.index("boundary condition node")?;
                            let line = tokens.line;
                            let value = tokens.vec3("boundary condition value")?;
                            let (kind_line, kind) = tokens.expect("boundary condition type")?;
                            let kind = kind
                                .parse::<BoundaryKind>()
                                .map_err(|e| RunnerError::frame_format(kind_line, e))?;
                            Ok(BoundaryCondition {
                                node,
                                kind,
                                value,
                                line,
                            })
                        })
                        .collect::<Result<_>>()?;
                }
                other => {
                    return Err(RunnerError::frame_format(
                        line,
                        format!("unrecognized command: {}", other),
                    ))
                }
            }
        }

        Ok(frame)
    }

    /// Check that every element and boundary condition names an existing node.
    pub fn check_references(&self) -> Result<()> {
        let count = self.nodes.len();
        for element in &self.elements {
            for node in [element.node1, element.node2] {
                if node >= count {
                    return Err(RunnerError::frame_format(
                        element.line,
                        format!("element references node {} of {}", node, count),
                    ));
                }
            }
        }
        for bc in &self.boundary_conditions {
            if bc.node >= count {
                return Err(RunnerError::frame_format(
                    bc.line,
                    format!("{} condition references node {} of {}", bc.kind, bc.node, count),
                ));
            }
        }
        Ok(())
    }
}

struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
    /// Line of the most recently consumed token.
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        let tokens = content
            .lines()
            .enumerate()
            .flat_map(|(i, l)| l.split_whitespace().map(move |t| (i + 1, t)))
            .collect();
        Self {
            tokens,
            pos: 0,
            line: 0,
        }
    }

    fn advance(&mut self) -> Option<(usize, &'a str)> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        self.line = token.0;
        Some(token)
    }

    fn expect(&mut self, what: &str) -> Result<(usize, &'a str)> {
        let line = self.line;
        self.advance().ok_or_else(|| {
            RunnerError::frame_format(line, format!("unexpected end of file, expected {}", what))
        })
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let (line, token) = self.expect(what)?;
        token
            .parse()
            .map_err(|_| RunnerError::frame_format(line, format!("invalid {}: {}", what, token)))
    }

    /// Counts and node indices accept C integer syntax: `12`, `0x0c`, `014`.
    fn index(&mut self, what: &str) -> Result<usize> {
        let (line, token) = self.expect(what)?;
        parse_c_index(token)
            .ok_or_else(|| RunnerError::frame_format(line, format!("invalid {}: {}", what, token)))
    }

    fn vec3(&mut self, what: &str) -> Result<Vec3> {
        Ok(Vec3::new(
            self.parse(what)?,
            self.parse(what)?,
            self.parse(what)?,
        ))
    }
}

fn parse_c_index(token: &str) -> Option<usize> {
    let digits = token.strip_prefix('+').unwrap_or(token);
    let (digits, radix) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (&digits[1..], 8)
    } else {
        (digits, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    usize::from_str_radix(digits, radix).ok()
}
