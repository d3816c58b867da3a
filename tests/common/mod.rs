//! Fake MarkdownTest project: a main checkout with its wiki cloned inside it.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::HashSet;

use wikiref::catalog::FileCatalog;
use wikiref::project::{Project, ProjectResolver};
use wikiref::types::{FileRef, FileType};
use wikiref::vcs::{VcsRoot, VcsRootRegistry};

pub const REMOTE: &str = "https://github.com/vsch/MarkdownTest";
pub const MAIN: &str = "/Users/vlad/src/MarkdownTest";
pub const WIKI: &str = "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki";

pub const NON_VCS_FILES: [&str; 5] = [
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/non-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Non-Vcs-Page.md",
    "/Users/vlad/src/MarkdownTest/SubDirectory/sub-dir-non-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/SubDirectory/sub-dir-non-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/non-vcs-image.png",
];

pub const FILE_PATHS: [&str; 80] = [
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/SubDirectory/File-In-Subdirectory.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/SubDirectory/In-Name.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/SubDirectory/Multiple-Match.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/SubDirectory/sub-dir-non-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/SubDirectory/sub-dir-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/anchor-in-name#5.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/anchor-in-name.md#5",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Home.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Multiple-Match.markdown",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Multiple-Match.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Multiple-Match.mkd",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/non-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Non-Vcs-Page.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/normal-file.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Not-Wiki-Ext.mkd",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Not-Wiki-Ext-2.markdown",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/single-link-test.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Space In Name.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Space In Name#6.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Test.kt",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/SubDirectory/Test2.kt",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/SubDirectory/Sub-Test.kt",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Test 4.2.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Test-Name.kt",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/Test-Name.kt.md",
    "/Users/vlad/src/MarkdownTest/Test.kt",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki/vcs-image.png",
    "/Users/vlad/src/MarkdownTest/SubDirectory/NestedFile.md",
    "/Users/vlad/src/MarkdownTest/SubDirectory/NestedFile#5.md",
    "/Users/vlad/src/MarkdownTest/SubDirectory/NestedFile.md#5",
    "/Users/vlad/src/MarkdownTest/SubDirectory/NonVcsNestedFile.md",
    "/Users/vlad/src/MarkdownTest/SubDirectory/Test.kt",
    "/Users/vlad/src/MarkdownTest/SubDirectory/sub-dir-non-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/SubDirectory/sub-dir-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/SubDirectory/Multiple-Match.md",
    "/Users/vlad/src/MarkdownTest/Multiple-Match.markdown",
    "/Users/vlad/src/MarkdownTest/Multiple-Match.md",
    "/Users/vlad/src/MarkdownTest/Multiple-Match.mkd",
    "/Users/vlad/src/MarkdownTest/untitled/README.md",
    "/Users/vlad/src/MarkdownTest/untitled/untitled.iml",
    "/Users/vlad/src/MarkdownTest/anchor-in-name#5.md",
    "/Users/vlad/src/MarkdownTest/MarkdownTest.iml",
    "/Users/vlad/src/MarkdownTest/non-vcs-image.png",
    "/Users/vlad/src/MarkdownTest/NonWikiFile.md",
    "/Users/vlad/src/MarkdownTest/Readme.md",
    "/Users/vlad/src/MarkdownTest/Rendering-Sanity-Test.md",
    "/Users/vlad/src/MarkdownTest/single-link-test.md",
    "/Users/vlad/src/MarkdownTest/vcs-image.png",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/autoNumeric/autoNumeric-2.0/autoNumeric-2.0-BETA change log.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/ChangeLog.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-datepicker/README.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-datepicker/tests/README.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-sass/CONTRIBUTING.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/cropper/README.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/CONTRIBUTING.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/cropper/LICENSE.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/cropper/CHANGELOG.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/Extras.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/README.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/autoNumeric/readme.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-datepicker/CHANGELOG.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/Installing.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/Version 4 Contributors guide.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-modal/README.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/autoNumeric/change log.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/Functions.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/ContributorsGuide.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/Options.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-sass/CHANGELOG.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/Events.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/autoNumeric/autoNumeric-2.0/readme.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/index.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-datepicker/CONTRIBUTING.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap/README.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/FAQ.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/eonasdan-bootstrap-datetimepicker/docs/Version 4 Changelog.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/cropper/CONTRIBUTING.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-datepicker/docs/README.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-daterangepicker/README.md",
    "/Users/vlad/src/MarkdownTest/GitHubIssues/Issue-46/webbeheer_package/bower_components/bootstrap-sass/README.md",
];

/// Hand-written capability: wiki checked before main, no registry involved.
pub struct MarkdownTestProject {
    files: Vec<FileRef>,
    main: VcsRoot,
    non_vcs: HashSet<&'static str>,
    wiki: VcsRoot,
}

impl MarkdownTestProject {
    pub fn new() -> Self {
        return Self {
            files: FILE_PATHS.iter().map(|p| FileRef::new(p)).collect(),
            main: VcsRoot::new(REMOTE, MAIN),
            non_vcs: NON_VCS_FILES.iter().copied().collect(),
            wiki: VcsRoot::new(REMOTE, WIKI),
        };
    }
}

impl ProjectResolver for MarkdownTestProject {
    fn github_repo(&self, file: &FileRef) -> Option<&VcsRoot> {
        if self.wiki.contains(file.path()) {
            return Some(&self.wiki);
        }
        if self.main.contains(file.path()) {
            return Some(&self.main);
        }
        return None;
    }

    fn is_under_vcs(&self, file: &FileRef) -> bool {
        return !self.non_vcs.contains(file.path());
    }

    fn project_base_path(&self) -> &str {
        return MAIN;
    }

    fn project_file_list(&self, file_types: &HashSet<FileType>) -> Option<Vec<FileRef>> {
        return Some(
            self.files
                .iter()
                .filter(|f| file_types.is_empty() || file_types.contains(&f.file_type()))
                .cloned()
                .collect(),
        );
    }
}

/// The same data as a production snapshot.
pub fn markdown_test_snapshot() -> Project {
    let registry = VcsRootRegistry::new(vec![VcsRoot::new(REMOTE, MAIN), VcsRoot::new(REMOTE, WIKI)]);
    return Project::new(MAIN, registry, FileCatalog::from_paths(&FILE_PATHS, &NON_VCS_FILES));
}

pub fn wiki(rel: &str) -> String {
    return format!("{WIKI}/{rel}");
}

pub fn main_repo(rel: &str) -> String {
    return format!("{MAIN}/{rel}");
}
