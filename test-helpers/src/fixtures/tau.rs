//! Tau scale-factor corrections with nested categories and formulas.
//!
//! Both dispatch on an `abseta` input that is not declared in `inputs`. The
//! schema accepts this; the audit flags it.

/// e → τh fake rate: genmatch → working point → systematic → |η| binning.
pub const TAU_ETF: &str = r#"{
  "name": "tau_etf",
  "version": 0,
  "inputs": [
    {"name": "eta", "type": "real", "description": "tau eta"},
    {"name": "genmatch", "type": "int", "description": "genmatch (0 or 6: no match, jet, 1 or 3: electron, 2 or 4: muon, 5: real tau"},
    {"name": "wp", "type": "string", "description": "DeepTauVSe WP: VVVLoose-VVTight"},
    {"name": "syst", "type": "string", "description": "systematic 'nom', 'up', 'down'"}
  ],
  "output": {"name": "weight", "type": "real"},
  "data": {
    "nodetype": "category",
    "input": "genmatch",
    "keys": [1],
    "content": [
      {
        "nodetype": "category",
        "input": "wp",
        "keys": ["Medium"],
        "content": [
          {
            "nodetype": "category",
            "input": "syst",
            "keys": ["nom", "unc"],
            "content": [
              {"nodetype": "binning", "input": "abseta", "edges": [0.0, 1.46, 1.558, 2.3], "content": [1.0, 1.0, 1.0]},
              {"nodetype": "binning", "input": "abseta", "edges": [0.0, 1.46, 1.558, 2.3], "content": [0.1, 0.1, 0.1]}
            ]
          }
        ]
      }
    ],
    "default": 1.0
  }
}"#;

/// Tau energy scale: genmatch → decay mode → systematic, with a pt-dependent
/// uncertainty formula.
pub const TAU_TES: &str = r#"{
  "name": "tau_tes",
  "description": "tau energy scale",
  "version": 0,
  "inputs": [
    {"name": "eta", "type": "real", "description": "tau eta"},
    {"name": "pt", "type": "real", "description": "tau pt"},
    {"name": "dm", "type": "int", "description": "tau decay mode (0, 1, 10, or 11)"},
    {"name": "genmatch", "type": "int", "description": "genmatch (0 or 6: no match, jet, 1 or 3: electron, 2 or 4: muon, 5: real tau"},
    {"name": "syst", "type": "string", "description": "systematic 'nom', 'up', 'down'"}
  ],
  "output": {"name": "weight", "type": "real"},
  "data": {
    "nodetype": "category",
    "input": "genmatch",
    "keys": [5, 1, 2],
    "content": [
      {
        "nodetype": "category",
        "input": "dm",
        "keys": [0, 1, 10],
        "content": [
          {"nodetype": "category", "input": "syst", "keys": ["nom", "unc"], "content": [
            1.0,
            {"expression": "x<34?0.01: x<170?0.01+(0.1-0.01)/(170.-34.)*(x-34): 0.1", "parser": "TFormula", "parameters": [1]}
          ]},
          {"nodetype": "category", "input": "syst", "keys": ["nom", "unc"], "content": [
            1.0,
            {"expression": "x<34?0.01: x<170?0.01+(0.1-0.01)/(170.-34.)*(x-34): 0.1", "parser": "TFormula", "parameters": [1]}
          ]},
          {"nodetype": "category", "input": "syst", "keys": ["nom", "unc"], "content": [
            1.0,
            {"expression": "x<34?0.01: x<170?0.01+(0.1-0.01)/(170.-34.)*(x-34): 0.1", "parser": "TFormula", "parameters": [1]}
          ]}
        ],
        "default": 1.0
      },
      {
        "nodetype": "category",
        "input": "dm",
        "keys": [0, 1],
        "content": [
          {"nodetype": "category", "input": "syst", "keys": ["nom", "up", "down"], "content": [
            {"nodetype": "binning", "input": "abseta", "edges": [0.0, 1.5, 2.5], "content": [1.0, 1.0]},
            {"nodetype": "binning", "input": "abseta", "edges": [0.0, 1.5, 2.5], "content": [1.1, 1.1]},
            {"nodetype": "binning", "input": "abseta", "edges": [0.0, 1.5, 2.5], "content": [0.9, 0.9]}
          ]},
          {"nodetype": "category", "input": "syst", "keys": ["nom", "up", "down"], "content": [
            {"nodetype": "binning", "input": "abseta", "edges": [0.0, 1.5, 2.5], "content": [1.0, 1.0]},
            {"nodetype": "binning", "input": "abseta", "edges": [0.0, 1.5, 2.5], "content": [1.1, 1.1]},
            {"nodetype": "binning", "input": "abseta", "edges": [0.0, 1.5, 2.5], "content": [0.9, 0.9]}
          ]}
        ],
        "default": 1.0
      },
      {
        "nodetype": "category",
        "input": "syst",
        "keys": ["nom", "unc"],
        "content": [1.0, 0.01]
      }
    ],
    "default": 1.0
  }
}"#;
