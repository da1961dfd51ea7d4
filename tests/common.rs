use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

pub fn sitepress() -> Command {
    cargo_bin_cmd!("sitepress")
}

/// Write a corpus file under the root, creating parent directories
pub fn write_doc(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small mixed corpus exercising every category and heuristic branch
#[allow(dead_code)]
pub fn seed_corpus(root: &Path) {
    write_doc(
        root,
        "helm/helm-deployment-guide.md",
        "# Helm Release Engineering\n\nHelm charts package Kubernetes manifests \
         for repeatable installs across clusters. Values files capture \
         per-environment overrides without forking the chart itself.\n\n\
         ## Rollbacks\n\n```mermaid\ngraph TD\n  A --> B\n```\n\n\
         Releases roll back atomically with `helm rollback`.\n",
    );
    write_doc(
        root,
        "ai/langchain-agents.md",
        "# LangChain Agent Orchestration\n\nLangChain agents route llm calls \
         through tool-using loops with structured traces. An agent graph keeps \
         multi-agent handoffs observable end to end.\n\n## Tool Binding\n\n\
         Tools bind through typed schemas.\n",
    );
    write_doc(
        root,
        "production/overview.md",
        "# Overview\n\n## Deploying ArgoCD with Kargo\n\nArgoCD reconciles \
         manifests from git while Kargo promotes image versions between \
         environments. Together argocd and kargo form a gitops promotion \
         pipeline with full audit history.\n",
    );
    write_doc(root, "workflow/tiny.md", "a short unstructured note\n");
}
